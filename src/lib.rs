//! Sumi-Tally: a bounded-concurrency internal link counter
//!
//! This crate crawls every page reachable from a seed URL on the seed's own host,
//! counts how many times each page is linked to internally, and reports the tally.
//! Fetches are throttled by a concurrency gate and the crawl stops growing once a
//! page ceiling is reached.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Errors that stop a crawl from starting
///
/// Failures inside a running crawl never surface here; they end only their own
/// branch and are counted in the report's statistics.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
///
/// These are the only globally fatal errors: they are raised before any crawl
/// task starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use crawler::Crawler;
pub use output::CrawlReport;
pub use state::{ClaimResult, PageOutcome, VisitLedger};
pub use url::{host_key, normalize_url, NormalizedUrl};
