//! HTML parser for extracting anchor targets
//!
//! Only `<a href="...">` values are returned, untouched. Resolving them and
//! deciding whether they are in scope is the URL classifier's job.

use scraper::{Html, Selector};

/// Extracts the raw `href` value of every anchor in the document
///
/// Values are returned in document order, trimmed, and may be relative,
/// absolute, fragment-only, or use non-HTTP schemes.
///
/// # Example
///
/// ```
/// use crawl_check::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a><a name="top">Anchor</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            tracing::warn!("Invalid anchor selector: {:?}", e);
            return Vec::new();
        }
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect()
}
