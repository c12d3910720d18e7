//! Final crawl report
//!
//! This module turns the finished crawl into the summary printed on exit.

use super::aggregator::{ErrorPolicy, ErrorSourceRecord};

/// Summary of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Number of distinct URLs dispatched
    pub visited: usize,

    /// Error policy the crawl ran under
    pub policy: ErrorPolicy,

    /// Error records sorted by `(source, url)`; always empty under stop-on-first
    pub errors: Vec<ErrorSourceRecord>,
}

impl CrawlReport {
    /// Returns true if any failure was collected
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Process exit status for this report
    pub fn exit_code(&self) -> u8 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    /// One-line visit summary
    pub fn summary_line(&self) -> String {
        format!("Visited {} unique URLs", self.visited)
    }

    /// Renders the error records, one per line, with a blank line between sources
    ///
    /// Each line reads `<source> -> <url>`.
    pub fn render_errors(&self) -> String {
        let mut out = String::new();
        let mut previous: Option<&str> = None;

        for record in &self.errors {
            if let Some(prev) = previous {
                if prev != record.source {
                    out.push('\n');
                }
            }
            out.push_str(&format!("{} -> {}\n", record.source, record.url));
            previous = Some(record.source.as_str());
        }

        out
    }
}

/// Prints the report: the summary to stdout, collected errors to stderr
pub fn print_report(report: &CrawlReport) {
    println!("{}", report.summary_line());

    if report.policy != ErrorPolicy::CollectAll {
        return;
    }

    if report.has_errors() {
        eprintln!(
            "\nFound broken links on {} page(s) (source -> url):\n",
            report.errors.len()
        );
        eprint!("{}", report.render_errors());
    } else {
        println!("No errors found");
    }
}
