//! Phase definitions for the completion detector
//!
//! The coordinator evaluates [`CrawlPhase::next`] after every dispatch batch
//! and after every check interval.

use std::fmt;

/// What the coordinator should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlPhase {
    /// Work is queued and there is room under the concurrency ceiling
    #[default]
    Dispatch,

    /// Nothing can be dispatched but fetches are still in flight
    Wait,

    /// The queue is empty and no fetch is outstanding
    Done,
}

impl CrawlPhase {
    /// Evaluates the transition function
    ///
    /// # Arguments
    ///
    /// * `queue_len` - Number of records waiting in the work queue
    /// * `in_flight` - Number of fetches dispatched but not yet handled
    /// * `ceiling` - Maximum number of concurrent fetches
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl_check::CrawlPhase;
    ///
    /// assert_eq!(CrawlPhase::next(3, 0, 2), CrawlPhase::Dispatch);
    /// assert_eq!(CrawlPhase::next(3, 2, 2), CrawlPhase::Wait);
    /// assert_eq!(CrawlPhase::next(0, 0, 2), CrawlPhase::Done);
    /// ```
    pub fn next(queue_len: usize, in_flight: usize, ceiling: usize) -> Self {
        if queue_len > 0 && in_flight < ceiling {
            Self::Dispatch
        } else if in_flight > 0 {
            Self::Wait
        } else {
            Self::Done
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dispatch => "dispatch",
            Self::Wait => "wait",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}
