//! Error aggregation for the collect-all policy
//!
//! Failures are compressed to one record per discovering page: the first
//! failing link found on a page is kept and later failures from the same
//! page are dropped. The report therefore points at each broken page once.

use crate::FetchError;

/// How the crawl reacts to a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the crawl on the first failure
    #[default]
    StopOnFirst,

    /// Keep crawling and report every failing source at the end
    CollectAll,
}

impl ErrorPolicy {
    /// Maps the `--all-errors` switch to a policy
    pub fn from_all_errors(all_errors: bool) -> Self {
        if all_errors {
            Self::CollectAll
        } else {
            Self::StopOnFirst
        }
    }
}

/// One failing URL, kept as the representative for its source page
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ErrorSourceRecord {
    // Field order drives the derived ordering: source first, then url
    /// The page (or `seed`) the failing URL was discovered on
    pub source: String,

    /// The failing URL
    pub url: String,
}

/// Collects at most one error record per distinct source
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    records: Vec<ErrorSourceRecord>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure unless its source already has one
    ///
    /// # Returns
    ///
    /// `true` if a new record was added
    pub fn record(&mut self, error: &FetchError) -> bool {
        let source = error.found_on();
        if self.records.iter().any(|r| r.source == source) {
            tracing::debug!(
                "Already recorded an error for source {}, skipping {}",
                source,
                error.url()
            );
            return false;
        }

        self.records.push(ErrorSourceRecord {
            source: source.to_string(),
            url: error.url().to_string(),
        });
        true
    }

    /// Number of distinct sources with at least one failure
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the aggregator, returning records sorted by `(source, url)`
    pub fn into_sorted(mut self) -> Vec<ErrorSourceRecord> {
        self.records.sort();
        self.records
    }
}
