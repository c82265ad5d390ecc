//! Crawl statistics
//!
//! Counts how many crawl tasks ended in each [`PageOutcome`] and when the crawl
//! ran.

use crate::state::PageOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Number of tasks per terminal outcome
    pub outcomes: HashMap<PageOutcome, u64>,

    /// When the seed task was spawned
    pub started_at: DateTime<Utc>,

    /// When the last task finished
    pub finished_at: DateTime<Utc>,
}

impl CrawlStatistics {
    pub fn new(
        outcomes: HashMap<PageOutcome, u64>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            outcomes,
            started_at,
            finished_at,
        }
    }

    /// Number of tasks that ended in `outcome`
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Total number of crawl tasks that ran
    pub fn total_tasks(&self) -> u64 {
        self.outcomes.values().sum()
    }

    /// Number of pages a fetch was attempted for
    pub fn fetch_attempts(&self) -> u64 {
        self.count(PageOutcome::Done)
            + self.count(PageOutcome::FetchFailed)
            + self.count(PageOutcome::ExtractFailed)
    }

    /// Number of branch-local errors (fetch or extraction)
    pub fn errors(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Percentage of fetch attempts that completed
    pub fn success_rate(&self) -> f64 {
        let attempts = self.fetch_attempts();
        if attempts == 0 {
            return 0.0;
        }
        (self.count(PageOutcome::Done) as f64 / attempts as f64) * 100.0
    }

    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Formats statistics as indented plain text
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Statistics ===\n");
    out.push_str(&format!(
        "  Duration: {:.2}s\n",
        stats.duration().num_milliseconds() as f64 / 1000.0
    ));
    out.push_str(&format!("  Tasks run: {}\n", stats.total_tasks()));
    out.push_str(&format!("  Pages fetched: {}\n", stats.fetch_attempts()));
    out.push_str(&format!("  Errors: {}\n", stats.errors()));
    out.push_str(&format!("  Success rate: {:.1}%\n", stats.success_rate()));

    out.push_str("  Outcomes:\n");
    for outcome in PageOutcome::terminal_outcomes() {
        let count = stats.count(outcome);
        if count > 0 {
            out.push_str(&format!("    {}: {}\n", outcome, count));
        }
    }

    out
}
