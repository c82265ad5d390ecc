//! Crawler coordinator - the recursive, concurrency-bounded traversal
//!
//! Every discovered URL becomes its own tokio task running [`crawl_page`]:
//!
//! 1. Wait for a gate slot
//! 2. Stop if the page ceiling is reached
//! 3. Parse the URL and drop it if it is off-host
//! 4. Normalize and claim it in the ledger; only the first claim continues
//! 5. Fetch the page and extract its links (resolved against the seed URL)
//! 6. Release the slot and spawn a child task per link while under the ceiling
//!
//! The ceiling check (2) and the claim (4) are separate ledger operations. Both
//! run while the task holds a gate slot, so at most `max_concurrency` tasks can
//! sit between them, and the ledger can end up at most `max_concurrency - 1`
//! entries past `max_pages`.

use crate::config::{Config, CrawlConfig};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::gate::ConcurrencyGate;
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::tracker::CompletionTracker;
use crate::output::{CrawlReport, CrawlStatistics};
use crate::state::{PageOutcome, VisitLedger};
use crate::url::{normalize_url, parse_url};
use crate::TallyError;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Shared state for every task of one crawl
///
/// Created once per crawl and handed to each task behind an `Arc`; there is no
/// global crawl state.
pub struct CrawlContext {
    config: CrawlConfig,
    ledger: VisitLedger,
    gate: ConcurrencyGate,
    tracker: Arc<CompletionTracker>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    outcomes: Mutex<HashMap<PageOutcome, u64>>,
}

impl CrawlContext {
    fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Self {
        let gate = ConcurrencyGate::new(config.max_concurrency());

        Self {
            config,
            ledger: VisitLedger::new(),
            gate,
            tracker: CompletionTracker::new(),
            fetcher,
            extractor,
            outcomes: Mutex::new(HashMap::new()),
        }
    }

    /// True while the ledger is below the page ceiling
    fn has_capacity(&self) -> bool {
        self.ledger.size() < self.config.max_pages()
    }

    fn record(&self, outcome: PageOutcome) {
        let mut outcomes = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner);
        *outcomes.entry(outcome).or_insert(0) += 1;
    }

    fn outcomes(&self) -> HashMap<PageOutcome, u64> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Main crawler structure
///
/// # Example
///
/// ```no_run
/// use sumi_tally::config::{Config, CrawlConfig};
/// use sumi_tally::crawler::Crawler;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let crawl = CrawlConfig::new("https://example.com", 3, 10)?;
/// let crawler = Crawler::from_config(crawl, &Config::default())?;
/// let report = crawler.run().await;
/// print!("{}", report.render_text());
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    ctx: Arc<CrawlContext>,
}

impl Crawler {
    /// Creates a crawler with explicit fetcher and link extractor
    pub fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Self {
        Self {
            ctx: Arc::new(CrawlContext::new(config, fetcher, extractor)),
        }
    }

    /// Creates a crawler that fetches over HTTP and extracts links from HTML
    pub fn from_config(config: CrawlConfig, settings: &Config) -> Result<Self, TallyError> {
        let fetcher = HttpFetcher::from_config(settings)?;
        Ok(Self::new(
            config,
            Arc::new(fetcher),
            Arc::new(HtmlLinkExtractor),
        ))
    }

    /// The settings this crawler was built with
    pub fn config(&self) -> &CrawlConfig {
        &self.ctx.config
    }

    /// Runs the crawl to completion and builds the report
    ///
    /// Returns once the whole task graph has resolved: either no reachable,
    /// unvisited, in-scope page remains, or the page ceiling stopped growth.
    pub async fn run(self) -> CrawlReport {
        let seed = self.ctx.config.seed().to_string();
        tracing::info!(
            "Starting crawl of {} (max concurrency: {}, max pages: {})",
            seed,
            self.ctx.config.max_concurrency(),
            self.ctx.config.max_pages()
        );

        let started_at = Utc::now();
        spawn_crawl(&self.ctx, seed);
        self.ctx.tracker.wait().await;
        let finished_at = Utc::now();

        let statistics = CrawlStatistics::new(self.ctx.outcomes(), started_at, finished_at);
        tracing::info!(
            "Crawl completed: {} distinct pages, {} fetched, {} errors in {}ms",
            self.ctx.ledger.size(),
            statistics.fetch_attempts(),
            statistics.errors(),
            statistics.duration().num_milliseconds()
        );

        CrawlReport::from_snapshot(&self.ctx.config, self.ctx.ledger.snapshot(), statistics)
    }
}

/// Registers and spawns a crawl task for `raw_url`
///
/// The task is registered with the completion tracker before it is spawned, and
/// its guard is dropped only after its own children were spawned.
fn spawn_crawl(ctx: &Arc<CrawlContext>, raw_url: String) {
    let guard = ctx.tracker.register();
    let ctx = Arc::clone(ctx);

    tokio::spawn(async move {
        let outcome = crawl_page(&ctx, &raw_url).await;
        tracing::trace!("{} -> {}", raw_url, outcome);
        ctx.record(outcome);
        drop(guard);
    });
}

/// Crawls a single page and fans out to its links
async fn crawl_page(ctx: &Arc<CrawlContext>, raw_url: &str) -> PageOutcome {
    let Some(permit) = ctx.gate.acquire().await else {
        tracing::warn!("Concurrency gate closed, dropping {}", raw_url);
        return PageOutcome::GateClosed;
    };

    // Admission
    if !ctx.has_capacity() {
        tracing::debug!("Page limit reached, skipping {}", raw_url);
        return PageOutcome::LimitReached;
    }
    tracing::trace!("{} -> {}", raw_url, PageOutcome::Admitted);

    // Parse & scope filter
    let url = match parse_url(raw_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Skipping unparsable URL {}: {}", raw_url, e);
            return PageOutcome::ParseFailed;
        }
    };

    if !ctx.config.in_scope(&url) {
        tracing::debug!("Skipping off-host URL {}", raw_url);
        return PageOutcome::ScopeRejected;
    }

    // Normalize & claim
    let key = match normalize_url(raw_url) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!("Failed to normalize URL {}: {}", raw_url, e);
            return PageOutcome::ParseFailed;
        }
    };

    if !ctx.ledger.claim(&key).is_first() {
        return PageOutcome::DuplicateRejected;
    }

    // Fetch
    tracing::info!("crawling: {}", raw_url);
    tracing::trace!("{} -> {}", raw_url, PageOutcome::Fetching);
    let page = match ctx.fetcher.fetch(raw_url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", raw_url, e);
            return PageOutcome::FetchFailed;
        }
    };

    // Extract, relative to the seed rather than the current page
    let links = match ctx
        .extractor
        .extract_links(&page.body, ctx.config.seed())
    {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!("Failed to extract links from {}: {}", raw_url, e);
            return PageOutcome::ExtractFailed;
        }
    };

    permit.release();

    // Fan out
    tracing::trace!("{} -> {}", raw_url, PageOutcome::FanningOut);
    tracing::debug!("Found {} links on {}", links.len(), raw_url);
    for link in links {
        if !ctx.has_capacity() {
            tracing::debug!("Page limit reached, not following remaining links on {}", raw_url);
            break;
        }
        spawn_crawl(ctx, link);
    }

    PageOutcome::Done
}
