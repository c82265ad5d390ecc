//! Markdown report generation
//!
//! Produces a human-readable markdown summary of a crawl: run timing, the outcome
//! breakdown, and the full page table.

use crate::output::report::CrawlReport;
use crate::output::traits::OutputResult;
use crate::state::PageOutcome;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report to `output_path`
///
/// # Arguments
///
/// * `report` - The finished crawl report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown report
/// * `Err(OutputError)` - Failed to write report
pub fn write_markdown_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let stats = &report.statistics;
    let mut md = String::new();

    md.push_str("# Sumi-Tally Crawl Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", report.seed));
    md.push_str(&format!("- **Started**: {}\n", stats.started_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        stats.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n\n",
        stats.duration().num_milliseconds() as f64 / 1000.0
    ));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Distinct Pages**: {}\n", report.len()));
    md.push_str(&format!("- **Pages Fetched**: {}\n", stats.fetch_attempts()));
    md.push_str(&format!("- **Total Errors**: {}\n", stats.errors()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Outcome breakdown
    md.push_str("## Task Outcome Breakdown\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    for outcome in PageOutcome::terminal_outcomes() {
        md.push_str(&format!("| {} | {} |\n", outcome, stats.count(outcome)));
    }
    md.push('\n');

    // Pages
    md.push_str("## Internal Links\n\n");
    if report.is_empty() {
        md.push_str("No pages were visited.\n");
    } else {
        md.push_str("| URL | Internal Links |\n");
        md.push_str("|-----|----------------|\n");
        for page in &report.pages {
            md.push_str(&format!(
                "| {} | {} |\n",
                report.display_url(page),
                page.count
            ));
        }
    }

    md
}
