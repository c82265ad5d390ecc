//! Configuration module for Sumi-Tally
//!
//! Two kinds of configuration live here:
//!
//! - [`CrawlConfig`]: the seed, concurrency limit and page ceiling for one crawl.
//!   Built from command-line arguments, validated once, then shared read-only by
//!   every crawl task.
//! - [`Config`]: optional runtime settings (user agent, HTTP timeouts, output)
//!   loaded from a TOML file. Every section has defaults.
//!
//! # Example
//!
//! ```no_run
//! use sumi_tally::config::{load_config, CrawlConfig};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sumi-tally.toml")).unwrap();
//! let crawl = CrawlConfig::new("https://example.com", 3, 10).unwrap();
//! println!("Crawling {} as {}", crawl.seed(), config.user_agent.user_agent_string());
//! ```

mod crawl;
mod parser;
mod types;
mod validation;

// Re-export types
pub use crawl::CrawlConfig;
pub use types::{Config, HttpConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
