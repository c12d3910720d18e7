//! URL handling module for crawl-check
//!
//! This module provides the crawl's URL record type, construction of the
//! target's base URL, and the classifier deciding which discovered links
//! stay in scope.

mod classify;

use crate::UrlResult;
use std::fmt;
use url::Url;

pub use classify::{classify_link, first_path_segment, DEFAULT_RESERVED_PREFIXES};

/// Sentinel source for URLs injected by the seed configuration
pub const SEED_SOURCE: &str = "seed";

/// Where a queued URL came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlSource {
    /// The seed URL or a path supplied on the command line
    Seed,
    /// The absolute URL of the page the link was found on
    Page(String),
}

impl UrlSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Seed => SEED_SOURCE,
            Self::Page(url) => url,
        }
    }
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL waiting to be fetched, together with where it was discovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Absolute URL to fetch
    pub url: String,

    /// Diagnostic only: the page (or seed) this URL was discovered on
    pub source: UrlSource,
}

impl UrlRecord {
    /// Creates a record for a seed or command-line URL
    pub fn seed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: UrlSource::Seed,
        }
    }

    /// Creates a record for a link discovered on `page`
    pub fn discovered(url: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: UrlSource::Page(page.into()),
        }
    }
}

/// Builds the `scheme://host:port` prefix every in-scope URL starts with
///
/// The returned string never ends with a slash, so it can be joined directly
/// with an absolute path.
///
/// # Examples
///
/// ```
/// use crawl_check::url::base_url;
///
/// assert_eq!(base_url("localhost", "3000").unwrap(), "http://localhost:3000");
/// ```
pub fn base_url(host: &str, port: &str) -> UrlResult<String> {
    let parsed = Url::parse(&format!("http://{}:{}", host, port))?;
    Ok(parsed.origin().ascii_serialization())
}

/// Joins the base URL with an absolute path
pub fn join_path(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}
