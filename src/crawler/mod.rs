//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] seam
//! - HTML parsing and link extraction behind the [`LinkExtractor`] seam
//! - The concurrency gate bounding simultaneous fetches
//! - The completion tracker that detects when the task graph has resolved
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod gate;
mod parser;
mod tracker;

pub use coordinator::{CrawlContext, Crawler};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageContent, PageFetcher};
pub use gate::{ConcurrencyGate, GatePermit};
pub use parser::{get_urls_from_html, ExtractError, HtmlLinkExtractor, LinkExtractor};
pub use tracker::{CompletionTracker, TaskGuard};

use crate::config::{Config, CrawlConfig};
use crate::output::CrawlReport;
use crate::TallyError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the runtime configuration
/// 2. Crawl every reachable in-scope page from the seed
/// 3. Return the sorted link-count report
///
/// # Arguments
///
/// * `crawl` - The seed and limits for this crawl
/// * `config` - Runtime settings (user agent, HTTP timeouts)
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished; per-page failures are in the statistics
/// * `Err(TallyError)` - The HTTP client could not be built
pub async fn crawl(crawl: CrawlConfig, config: &Config) -> Result<CrawlReport, TallyError> {
    let crawler = Crawler::from_config(crawl, config)?;
    Ok(crawler.run().await)
}
