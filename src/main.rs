//! Webspan main entry point
//!
//! Command-line interface for the webspan link mapper. A single invocation
//! can crawl a seed URL, resolve a file of hostnames to IP addresses, or
//! both; the two modes are independent.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use webspan::config::{load_config, validate_config, Config};
use webspan::{crawler, output, resolver, SpanError};

/// Webspan: a breadth-expanding link mapper
///
/// Webspan crawls outward from a seed URL, following every hyperlink and
/// script source it discovers until no new links remain, and reports the
/// deduplicated link set in first-discovery order.
#[derive(Parser, Debug)]
#[command(name = "webspan")]
#[command(version)]
#[command(about = "A breadth-expanding link mapper", long_about = None)]
struct Cli {
    /// URL to crawl
    #[arg(short, long)]
    url: Option<String>,

    /// Number of concurrent fetch workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Write the final link list to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also print form actions discovered on the seed page
    #[arg(long)]
    forms: bool,

    /// Resolve hostnames listed in this file (one per line) to IP addresses
    #[arg(long, value_name = "FILE")]
    resolve: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.url.is_none() && cli.resolve.is_none() {
        return Err(SpanError::MissingTarget.into());
    }

    // Defaults, overridden by the config file, overridden by CLI flags
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    validate_config(&config)?;

    if let Some(path) = &cli.resolve {
        handle_resolve(path).await?;
    }

    if let Some(url) = &cli.url {
        handle_crawl(config, url, &cli).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webspan=info,warn"),
            1 => EnvFilter::new("webspan=debug,info"),
            2 => EnvFilter::new("webspan=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies the seed-normalization rule before the first fetch
///
/// A target that does not end in a path separator gets the configured
/// suffix appended, pointing bare hosts at their content root.
fn normalize_seed(target: &str, suffix: &str) -> String {
    if target.ends_with('/') {
        target.to_string()
    } else {
        format!("{}{}", target, suffix)
    }
}

/// Handles the crawl mode: run to completion, print, optionally save
async fn handle_crawl(config: Config, url: &str, cli: &Cli) -> Result<()> {
    let seed = normalize_seed(url, &config.crawler.seed_suffix);
    tracing::info!(
        "Starting crawl of {} with {} workers",
        seed,
        config.crawler.workers
    );

    let result = crawler::crawl(config, &seed).await?;

    output::print_links(&result.links);
    if cli.forms {
        output::print_seed_forms(&result.seed_forms);
    }
    output::print_summary(&result);

    if let Some(path) = &cli.output {
        output::write_links(path, &result.links)?;
        tracing::info!("Saved {} links to {}", result.links.len(), path.display());
    }

    Ok(())
}

/// Handles the resolve mode: report every hostname in the file
async fn handle_resolve(path: &Path) -> Result<()> {
    tracing::info!("Resolving hostnames from {}", path.display());

    let outcomes = resolver::resolve_hosts_file(path).await?;
    output::print_resolutions(&outcomes);

    Ok(())
}
