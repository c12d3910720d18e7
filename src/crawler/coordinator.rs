//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop, which owns all mutable crawl
//! state and coordinates:
//! - Dispatching queued URLs while staying under the concurrency ceiling
//! - Handling fetch outcomes one at a time as they complete
//! - Feeding discovered in-scope links back into the frontier
//! - Applying the error policy
//! - Deciding when the crawl is finished
//!
//! Fetches run as tokio tasks that only perform network I/O. Their outcomes
//! come back through a `JoinSet` and are applied on the coordinator's own
//! task, so the frontier, the in-flight counter and the error aggregator are
//! never touched concurrently.

use crate::config::Config;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_hrefs;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::output::{CrawlReport, ErrorAggregator, ErrorPolicy};
use crate::state::CrawlPhase;
use crate::url::{base_url, classify_link, join_path, UrlRecord};
use crate::{CrawlCheckError, FetchError, UrlError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// A finished fetch, returned from the spawned task to the coordinator
#[derive(Debug)]
struct FetchOutcome {
    record: UrlRecord,
    result: FetchResult,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    frontier: Frontier,
    /// Fetches dispatched whose outcome has not been handled yet
    in_flight: usize,
    tasks: JoinSet<FetchOutcome>,
    errors: ErrorAggregator,
    phase: CrawlPhase,
    client: Client,
    base_url: String,
    /// Lowercased host of `base_url`; pages served from any other host are not parsed
    target_host: String,
    reserved_prefixes: Vec<String>,
    ceiling: usize,
    check_interval: Duration,
    policy: ErrorPolicy,
    single_path: bool,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// The frontier is seeded with `<base>/` for a full crawl, or with one
    /// record per configured path in single-path mode.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlCheckError)` - The target address is invalid or the HTTP client failed to build
    pub fn new(config: Config) -> Result<Self, CrawlCheckError> {
        let base_url = base_url(&config.target.host, &config.target.port)?;
        let target_host = Url::parse(&base_url)
            .map_err(UrlError::from)?
            .host_str()
            .unwrap_or_default()
            .to_string();
        let single_path = config.is_single_path_mode();

        let seeds: Vec<UrlRecord> = if single_path {
            config
                .specific_paths
                .iter()
                .map(|path| UrlRecord::seed(join_path(&base_url, path)))
                .collect()
        } else {
            vec![UrlRecord::seed(join_path(&base_url, "/"))]
        };

        tracing::info!(
            "Seeding frontier with {} URL(s) on {}",
            seeds.len(),
            base_url
        );

        let client = build_http_client(&config.crawler.user_agent)?;

        Ok(Self {
            frontier: Frontier::with_seeds(seeds),
            in_flight: 0,
            tasks: JoinSet::new(),
            errors: ErrorAggregator::new(),
            phase: CrawlPhase::default(),
            client,
            base_url,
            target_host,
            reserved_prefixes: config.crawler.reserved_prefixes.clone(),
            ceiling: config.crawler.concurrent,
            check_interval: Duration::from_millis(config.crawler.check_queue_interval),
            policy: config.crawler.error_policy(),
            single_path,
        })
    }

    /// Runs the crawl until the queue is drained and nothing is in flight
    ///
    /// Every iteration first applies the outcomes of finished fetches, then
    /// evaluates the phase:
    /// - `Dispatch`: launch fetches until the queue empties or the ceiling is hit
    /// - `Wait`: sleep for the check interval
    /// - `Done`: build the report
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl finished (possibly with collected errors)
    /// * `Err(CrawlCheckError::Fatal)` - A page failed under the stop-on-first policy;
    ///   fetches still in flight are aborted when the coordinator is dropped
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlCheckError> {
        tracing::info!("Starting crawl of {}", self.base_url);
        let start_time = Instant::now();

        loop {
            self.collect_completed()?;

            self.phase = CrawlPhase::next(self.frontier.queue_len(), self.in_flight, self.ceiling);
            match self.phase {
                CrawlPhase::Dispatch => self.dispatch(),
                CrawlPhase::Wait => {
                    tracing::trace!(
                        "Waiting: {} in flight, {} queued",
                        self.in_flight,
                        self.frontier.queue_len()
                    );
                    tokio::time::sleep(self.check_interval).await;
                }
                CrawlPhase::Done => break,
            }
        }

        tracing::info!(
            "Crawl completed: {} URLs visited in {:?}",
            self.frontier.visited_count(),
            start_time.elapsed()
        );
        if !self.errors.is_empty() {
            tracing::info!("{} source page(s) with broken links", self.errors.len());
        }

        Ok(CrawlReport {
            visited: self.frontier.visited_count(),
            policy: self.policy,
            errors: std::mem::take(&mut self.errors).into_sorted(),
        })
    }

    /// Launches fetches until the queue is empty or the ceiling is reached
    ///
    /// Never waits on the network; the spawned tasks report back through
    /// the join set.
    fn dispatch(&mut self) {
        while self.in_flight < self.ceiling {
            let record = match self.frontier.next_unvisited() {
                Some(record) => record,
                None => break,
            };

            self.in_flight += 1;
            tracing::debug!(
                "Fetching {} (found on {}), {} in flight",
                record.url,
                record.source,
                self.in_flight
            );

            let client = self.client.clone();
            self.tasks.spawn(async move {
                let result = fetch_url(&client, &record.url).await;
                FetchOutcome { record, result }
            });
        }
    }

    /// Applies every outcome that has already arrived, without waiting
    fn collect_completed(&mut self) -> Result<(), CrawlCheckError> {
        while let Some(joined) = self.tasks.try_join_next() {
            self.handle_outcome(joined?)?;
        }
        Ok(())
    }

    fn handle_outcome(&mut self, outcome: FetchOutcome) -> Result<(), CrawlCheckError> {
        self.in_flight -= 1;

        let FetchOutcome { record, result } = outcome;
        match result {
            FetchResult::Success { final_url, body } => {
                if !self.single_path {
                    self.enqueue_links(&final_url, &body);
                }
                Ok(())
            }
            FetchResult::HttpError { status_code } => self.handle_error(FetchError::Status {
                url: record.url,
                found_on: record.source.to_string(),
                status: status_code,
            }),
            FetchResult::NetworkError { error } => self.handle_error(FetchError::Transport {
                url: record.url,
                found_on: record.source.to_string(),
                message: error,
            }),
        }
    }

    /// Classifies every anchor on the page and queues the in-scope ones
    ///
    /// `final_url` is where the body was actually served from, after any
    /// redirects; relative links resolve against it. A page that redirected
    /// off the target host is fetched but not parsed.
    fn enqueue_links(&mut self, final_url: &str, body: &str) {
        let page_url = match Url::parse(final_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot resolve links on {}: {}", final_url, e);
                return;
            }
        };

        if page_url.host_str() != Some(self.target_host.as_str()) {
            tracing::debug!("Not following links on off-host page {}", page_url);
            return;
        }

        let mut queued = 0;
        for href in extract_hrefs(body) {
            if let Some(link) =
                classify_link(&href, &page_url, &self.base_url, &self.reserved_prefixes)
            {
                if self.frontier.try_enqueue(link) {
                    queued += 1;
                }
            }
        }

        tracing::debug!("Queued {} link(s) from {}", queued, final_url);
    }

    fn handle_error(&mut self, error: FetchError) -> Result<(), CrawlCheckError> {
        tracing::error!("{}", error);

        match self.policy {
            ErrorPolicy::StopOnFirst => Err(CrawlCheckError::Fatal(error)),
            ErrorPolicy::CollectAll => {
                self.errors.record(&error);
                Ok(())
            }
        }
    }

    /// Number of distinct URLs dispatched so far
    pub fn visited_count(&self) -> usize {
        self.frontier.visited_count()
    }

    /// Number of fetches dispatched but not yet handled
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// The phase chosen at the last evaluation
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// `scheme://host:port` every crawled URL starts with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use crawl_check::config::Config;
/// use crawl_check::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("{}", report.summary_line());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, CrawlCheckError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
