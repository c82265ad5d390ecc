//! Output handler traits and error types

use crate::output::markdown::write_markdown_report;
use crate::output::report::CrawlReport;
use crate::output::stats::format_statistics;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report destinations
pub trait OutputHandler {
    /// Writes a finished crawl report
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()>;
}

/// Prints the text report to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOutput {
    /// Append the statistics block after the page list
    pub include_statistics: bool,
}

impl StdoutOutput {
    /// Renders exactly what [`OutputHandler::write_report`] prints
    pub fn render(&self, report: &CrawlReport) -> String {
        let mut text = report.render_text();
        if self.include_statistics {
            text.push('\n');
            text.push_str(&format_statistics(&report.statistics));
        }
        text
    }
}

impl OutputHandler for StdoutOutput {
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(self.render(report).as_bytes())?;
        handle.flush()?;
        Ok(())
    }
}

/// Writes the markdown report to a file
#[derive(Debug, Clone)]
pub struct MarkdownOutput {
    path: PathBuf,
}

impl MarkdownOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownOutput {
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()> {
        write_markdown_report(report, &self.path).map_err(|e| {
            OutputError::Write(format!("{}: {}", self.path.display(), e))
        })?;
        tracing::info!("Markdown report written to {}", self.path.display());
        Ok(())
    }
}
