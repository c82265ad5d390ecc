//! Sumi-Tally main entry point
//!
//! This is the command-line interface for the Sumi-Tally internal link counter.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_tally::config::{load_config, Config, CrawlConfig};
use sumi_tally::crawler::crawl;
use sumi_tally::output::{MarkdownOutput, OutputHandler, StdoutOutput};
use tracing_subscriber::EnvFilter;

/// Sumi-Tally: a bounded-concurrency internal link counter
///
/// Sumi-Tally crawls every page reachable from URL on the same host, with at
/// most MAX_CONCURRENCY fetches in flight, until MAX_PAGES distinct pages have
/// been visited. It then prints how many times each page is linked internally.
#[derive(Parser, Debug)]
#[command(name = "sumi-tally")]
#[command(version)]
#[command(about = "A bounded-concurrency internal link counter", long_about = None)]
struct Cli {
    /// Seed URL; only pages on its host are crawled
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of simultaneous page fetches
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: usize,

    /// Maximum number of distinct pages to visit
    #[arg(value_name = "MAX_PAGES")]
    max_pages: usize,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write a markdown report to this file
    #[arg(short, long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Print crawl statistics after the report
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Everything below is validated before the first task is spawned
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let crawl_config = CrawlConfig::new(&cli.url, cli.max_concurrency, cli.max_pages)
        .context("invalid crawl arguments")?;

    let summary_path = cli
        .summary
        .clone()
        .or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));

    println!("starting crawl of: {}", crawl_config.seed());

    let report = crawl(crawl_config, &config).await?;

    StdoutOutput {
        include_statistics: cli.stats,
    }
    .write_report(&report)?;

    if let Some(path) = summary_path {
        MarkdownOutput::new(&path)
            .write_report(&report)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_tally=info,warn"),
            1 => EnvFilter::new("sumi_tally=debug,info"),
            2 => EnvFilter::new("sumi_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
