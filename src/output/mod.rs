//! Output module for error collection and the final report
//!
//! This module handles:
//! - Collecting failures under the collect-all policy
//! - Building and printing the end-of-crawl summary

mod aggregator;
mod report;

pub use aggregator::{ErrorAggregator, ErrorPolicy, ErrorSourceRecord};
pub use report::{print_report, CrawlReport};
