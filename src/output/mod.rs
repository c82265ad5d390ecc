//! Output module for crawl reports
//!
//! This module handles:
//! - Building the sorted page report from the visit ledger
//! - Rendering it as plain text or markdown
//! - Recording crawl statistics per task outcome

mod markdown;
mod report;
pub mod stats;
mod traits;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{CrawlReport, PageReport};
pub use stats::{format_statistics, CrawlStatistics};
pub use traits::{MarkdownOutput, OutputError, OutputHandler, OutputResult, StdoutOutput};
