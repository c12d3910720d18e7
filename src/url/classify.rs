use super::UrlRecord;
use url::Url;

/// Path prefixes served by infrastructure in front of the app, never content pages
pub const DEFAULT_RESERVED_PREFIXES: &[&str] = &["cdn-cgi"];

/// Decides whether a discovered link is in scope and builds its canonical URL
///
/// # Rules
///
/// Applied in order; the first one that matches discards the link:
///
/// 1. The link cannot be resolved against the page, or the first segment of
///    its resolved path is one of `reserved_prefixes`
/// 2. The resolved host differs from the page's host (foreign origin, or a
///    host-less scheme such as `mailto:` or `javascript:`)
/// 3. The href carries no path of its own (`#section`, `?page=2`, or empty)
///
/// Links that survive are rebuilt as `base_url + resolved path`. Query strings
/// and fragments are dropped, so `/a?x=1` and `/a#top` both map to `/a`.
///
/// # Arguments
///
/// * `href` - The raw `href` attribute value
/// * `page_url` - Absolute URL of the page the link was found on
/// * `base_url` - `scheme://host:port` of the crawl target, without trailing slash
/// * `reserved_prefixes` - First path segments that are never crawled
///
/// # Returns
///
/// * `Some(UrlRecord)` - In-scope link, sourced from `page_url`
/// * `None` - The link is out of scope
///
/// # Examples
///
/// ```
/// use crawl_check::url::classify_link;
/// use url::Url;
///
/// let page = Url::parse("http://localhost:3000/docs/").unwrap();
/// let reserved = vec!["cdn-cgi".to_string()];
///
/// let record = classify_link("intro", &page, "http://localhost:3000", &reserved).unwrap();
/// assert_eq!(record.url, "http://localhost:3000/docs/intro");
///
/// assert!(classify_link("https://example.com/", &page, "http://localhost:3000", &reserved).is_none());
/// ```
pub fn classify_link(
    href: &str,
    page_url: &Url,
    base_url: &str,
    reserved_prefixes: &[String],
) -> Option<UrlRecord> {
    let href = href.trim();

    let resolved = match page_url.join(href) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::trace!("Skipping unresolvable link {:?}: {}", href, e);
            return None;
        }
    };

    if let Some(segment) = first_path_segment(&resolved) {
        if reserved_prefixes.iter().any(|prefix| prefix == segment) {
            tracing::trace!("Skipping reserved path {}", resolved);
            return None;
        }
    }

    if !same_host(&resolved, page_url) {
        tracing::trace!("Skipping foreign link {}", resolved);
        return None;
    }

    if own_path(href).is_empty() {
        return None;
    }

    Some(UrlRecord::discovered(
        format!("{}{}", base_url, resolved.path()),
        page_url.as_str(),
    ))
}

/// Returns the first non-empty segment of a URL's path
///
/// ```
/// use crawl_check::url::first_path_segment;
/// use url::Url;
///
/// let url = Url::parse("http://localhost/cdn-cgi/l/email-protection").unwrap();
/// assert_eq!(first_path_segment(&url), Some("cdn-cgi"));
/// ```
pub fn first_path_segment(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|segment| !segment.is_empty())
}

fn same_host(resolved: &Url, page_url: &Url) -> bool {
    match (resolved.host_str(), page_url.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// The part of a raw href before any query or fragment
fn own_path(href: &str) -> &str {
    let end = href.find(|c| c == '?' || c == '#').unwrap_or(href.len());
    &href[..end]
}
