//! Work queue and visited set for the crawl
//!
//! This module handles:
//! - The double-ended queue of URLs waiting to be fetched
//! - The set of URLs already dispatched, which gates both enqueue and dispatch
//!
//! Newly discovered links go to the front of the queue so the crawl digs into
//! the page it is on before returning to older backlog. Seeds go to the back.

use crate::url::UrlRecord;
use std::collections::{HashSet, VecDeque};

/// Pending work plus every URL that has already been dispatched
#[derive(Debug, Default)]
pub struct Frontier {
    /// Records waiting to be fetched (front is popped first)
    queue: VecDeque<UrlRecord>,

    /// URLs already handed to the fetcher; never shrinks
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier seeded with the given records, in order
    pub fn with_seeds(seeds: impl IntoIterator<Item = UrlRecord>) -> Self {
        let mut frontier = Self::new();
        for seed in seeds {
            frontier.push_seed(seed);
        }
        frontier
    }

    /// Appends an externally supplied record to the back of the queue
    pub fn push_seed(&mut self, record: UrlRecord) {
        self.queue.push_back(record);
    }

    /// Pushes a discovered record to the front unless its URL was already visited
    ///
    /// The same URL may still be queued more than once if several pages link
    /// to it before it is dispatched; [`Frontier::next_unvisited`] drops the
    /// extra copies.
    ///
    /// # Returns
    ///
    /// `true` if the record was queued
    pub fn try_enqueue(&mut self, record: UrlRecord) -> bool {
        if self.visited.contains(&record.url) {
            return false;
        }

        self.queue.push_front(record);
        true
    }

    /// Pops the next record that has not been visited and marks it visited
    ///
    /// Already-visited records found at the front are discarded silently.
    /// Returns `None` once the queue is exhausted.
    pub fn next_unvisited(&mut self) -> Option<UrlRecord> {
        while let Some(record) = self.queue.pop_front() {
            if self.visited.insert(record.url.clone()) {
                return Some(record);
            }
            tracing::trace!("Dropping duplicate queue entry {}", record.url);
        }
        None
    }

    /// Returns the number of records in the queue (including duplicates)
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of distinct URLs dispatched so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
