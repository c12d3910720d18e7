//! State tracking for the crawl
//!
//! This module defines the phases the completion detector moves through
//! while a crawl is running.

mod phase;

pub use phase::CrawlPhase;
