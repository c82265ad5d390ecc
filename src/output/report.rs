//! Page report built from the final ledger snapshot

use crate::config::CrawlConfig;
use crate::output::stats::CrawlStatistics;
use crate::url::NormalizedUrl;
use std::cmp::Ordering;
use url::Url;

/// One page in the report and the number of internal links to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub url: NormalizedUrl,
    pub count: u32,
}

impl Ord for PageReport {
    // Most-linked first, then alphabetical
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.url.cmp(&other.url))
    }
}

impl PartialOrd for PageReport {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The result of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed exactly as it was given
    pub seed: String,

    /// The parsed seed URL
    pub base_url: Url,

    /// Pages sorted by descending count, then ascending key
    pub pages: Vec<PageReport>,

    /// Per-outcome task counts and timing
    pub statistics: CrawlStatistics,
}

impl CrawlReport {
    /// Builds a report from a ledger snapshot
    ///
    /// The snapshot may be in any order; the report is sorted deterministically.
    pub fn from_snapshot(
        crawl: &CrawlConfig,
        snapshot: Vec<(NormalizedUrl, u32)>,
        statistics: CrawlStatistics,
    ) -> Self {
        let mut pages: Vec<PageReport> = snapshot
            .into_iter()
            .map(|(url, count)| PageReport { url, count })
            .collect();
        pages.sort();

        Self {
            seed: crawl.seed().to_string(),
            base_url: crawl.base_url().clone(),
            pages,
            statistics,
        }
    }

    /// Returns the count recorded for a normalized key
    pub fn count_for(&self, key: &str) -> Option<u32> {
        self.pages
            .iter()
            .find(|page| page.url.as_str() == key)
            .map(|page| page.count)
    }

    /// Number of distinct pages in the report
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no page was recorded
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Turns a page key back into a browsable URL using the seed's scheme
    pub fn display_url(&self, page: &PageReport) -> String {
        format!("{}://{}", self.base_url.scheme(), page.url)
    }

    /// Renders the plain-text report
    ///
    /// ```text
    /// =============================
    ///   REPORT for https://example.com
    /// =============================
    /// Found 3 internal links to https://example.com
    /// ```
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("=============================\n");
        out.push_str(&format!("  REPORT for {}\n", self.seed));
        out.push_str("=============================\n");

        for page in &self.pages {
            out.push_str(&format!(
                "Found {} internal links to {}\n",
                page.count,
                self.display_url(page)
            ));
        }

        out
    }
}
