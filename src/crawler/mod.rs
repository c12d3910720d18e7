//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The work queue and visited set
//! - HTTP fetching and outcome classification
//! - Anchor extraction from HTML
//! - Overall crawl coordination and completion detection

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::Frontier;
pub use parser::extract_hrefs;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::CrawlCheckError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the base URL and seed the frontier
/// 2. Build the HTTP client
/// 3. Dispatch fetches up to the concurrency ceiling
/// 4. Extract and follow same-host links
/// 5. Apply the error policy to failed pages
/// 6. Return the final report once nothing is queued or in flight
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlCheckError)` - Crawl could not start, or stopped on the first error
pub async fn crawl(config: Config) -> Result<CrawlReport, CrawlCheckError> {
    run_crawl(config).await
}
