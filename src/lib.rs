//! crawl-check: a same-origin crawler for locally running web applications
//!
//! This crate walks every page reachable from a seed URL on a single host,
//! keeping a bounded number of requests in flight, and reports every page
//! that did not answer with `200 OK`.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl-check operations
#[derive(Debug, Error)]
pub enum CrawlCheckError {
    /// A page failed while the stop-on-first-error policy was active
    #[error("Crawl stopped: {0}")]
    Fatal(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A failed page fetch, as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request to {url} failed (found on {found_on}): {message}")]
    Transport {
        url: String,
        found_on: String,
        message: String,
    },

    #[error("{url} returned HTTP {status} (found on {found_on})")]
    Status {
        url: String,
        found_on: String,
        status: u16,
    },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }

    /// The page (or `seed`) on which the failing URL was discovered
    pub fn found_on(&self) -> &str {
        match self {
            Self::Transport { found_on, .. } | Self::Status { found_on, .. } => found_on,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),
}

/// Result type alias for crawl-check operations
pub type Result<T> = std::result::Result<T, CrawlCheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use output::{CrawlReport, ErrorPolicy};
pub use state::CrawlPhase;
pub use crate::url::{classify_link, UrlRecord, UrlSource};
