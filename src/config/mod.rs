//! Configuration module for crawl-check
//!
//! Every setting has a default, can be set in an optional TOML file, and
//! can be overridden on the command line.
//!
//! # Example
//!
//! ```no_run
//! use crawl_check::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl-check.toml")).unwrap();
//! println!("Crawler will keep {} requests in flight", config.crawler.concurrent);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{default_user_agent, Config, CrawlerConfig, TargetConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
