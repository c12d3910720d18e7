//! crawl-check main entry point
//!
//! This is the command-line interface for the crawl-check link validator.

use anyhow::Context;
use clap::Parser;
use crawl_check::config::{load_config_with_hash, validate, Config};
use crawl_check::crawler::crawl;
use crawl_check::output::print_report;
use crawl_check::{CrawlCheckError, CrawlReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Printed after a stop-on-first-error crawl halts
const FIRST_ERROR_GUIDANCE: &str =
    "Stopped at the first error. Re-run with --all-errors to collect every broken link.";

/// crawl-check: verify every page of a local web app answers 200
///
/// Starts at http://<host>:<port>/, follows every same-host link it finds,
/// and fails if any page cannot be fetched or returns a non-200 status.
#[derive(Parser, Debug)]
#[command(name = "crawl-check")]
#[command(version)]
#[command(about = "Crawl a locally running web app and check every page", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress while crawling
    #[arg(short, long)]
    verbose: bool,

    /// Port of the target server [default: 3000]
    #[arg(short, long)]
    port: Option<String>,

    /// Host of the target server [default: localhost]
    #[arg(long)]
    host: Option<String>,

    /// Keep crawling after failures and report all of them at the end
    #[arg(long, alias = "allErrors")]
    all_errors: bool,

    /// Milliseconds between checks for finished requests [default: 200]
    #[arg(long, alias = "checkQueueInterval", value_name = "MS")]
    check_queue_interval: Option<u64>,

    /// Maximum number of requests in flight [default: 50]
    #[arg(short, long, value_name = "N")]
    concurrent: Option<usize>,

    /// Check only these paths, without following links
    #[arg(long, alias = "specificPaths", value_name = "PATH", num_args = 1..)]
    specific_paths: Vec<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber; diagnostics go to stderr
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("crawl_check=debug,info")
    } else {
        EnvFilter::new("crawl_check=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the configuration, runs the crawl, and maps the result to an exit code
async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = build_config(&cli)?;

    if config.is_single_path_mode() {
        tracing::info!("Checking {} specific path(s)", config.specific_paths.len());
    }

    let status = exit_status(crawl(config).await)?;
    Ok(ExitCode::from(status))
}

/// Reports the crawl result and returns the process exit status
///
/// A fatal page failure is a normal failed run (status 1). Any other error
/// is propagated so `main` logs it.
fn exit_status(result: Result<CrawlReport, CrawlCheckError>) -> anyhow::Result<u8> {
    match result {
        Ok(report) => {
            print_report(&report);
            Ok(report.exit_code())
        }
        Err(CrawlCheckError::Fatal(_)) => {
            // The failure itself has already been logged by the coordinator
            eprintln!("\n{}", FIRST_ERROR_GUIDANCE);
            Ok(1)
        }
        Err(e) => Err(e).context("Crawl failed"),
    }
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?;
            tracing::debug!("Configuration loaded from {} (hash: {})", path.display(), hash);
            config
        }
        None => Config::default(),
    };

    if let Some(host) = &cli.host {
        config.target.host = host.clone();
    }
    if let Some(port) = &cli.port {
        config.target.port = port.clone();
    }
    if cli.all_errors {
        config.crawler.all_errors = true;
    }
    if let Some(interval) = cli.check_queue_interval {
        config.crawler.check_queue_interval = interval;
    }
    if let Some(concurrent) = cli.concurrent {
        config.crawler.concurrent = concurrent;
    }
    if !cli.specific_paths.is_empty() {
        config.specific_paths = cli.specific_paths.clone();
    }
    if let Some(user_agent) = &cli.user_agent {
        config.crawler.user_agent = user_agent.clone();
    }

    validate(&config).context("Invalid configuration")?;

    tracing::debug!(
        "Target {}:{}, concurrency {}, check interval {}ms, all errors: {}",
        config.target.host,
        config.target.port,
        config.crawler.concurrent,
        config.crawler.check_queue_interval,
        config.crawler.all_errors
    );

    Ok(config)
}
