use crate::output::ErrorPolicy;
use crate::url::DEFAULT_RESERVED_PREFIXES;
use serde::Deserialize;

/// Main configuration structure for crawl-check
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetConfig,
    pub crawler: CrawlerConfig,

    /// Crawl only these paths, without following links
    #[serde(rename = "specific-paths")]
    pub specific_paths: Vec<String>,
}

impl Config {
    /// Returns true if an explicit path list replaces the seed crawl
    pub fn is_single_path_mode(&self) -> bool {
        !self.specific_paths.is_empty()
    }
}

/// The locally running application being checked
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Host name of the target server
    pub host: String,

    /// Port of the target server, kept as given on the command line
    pub port: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: "3000".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of fetches in flight at once
    pub concurrent: usize,

    /// Interval between completion checks (milliseconds)
    #[serde(rename = "check-queue-interval")]
    pub check_queue_interval: u64,

    /// Collect every failure instead of stopping at the first one
    #[serde(rename = "all-errors")]
    pub all_errors: bool,

    /// First path segments that are never crawled
    #[serde(rename = "reserved-prefixes")]
    pub reserved_prefixes: Vec<String>,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl CrawlerConfig {
    pub fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::from_all_errors(self.all_errors)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrent: 50,
            check_queue_interval: 200,
            all_errors: false,
            reserved_prefixes: DEFAULT_RESERVED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            user_agent: default_user_agent(),
        }
    }
}

/// `crawl-check/<crate version>`
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
