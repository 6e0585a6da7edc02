//! Crawler module for frontier expansion
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and failure classification
//! - HTML extraction of links, script sources, and form actions
//! - The visited registry that deduplicates all work ever claimed
//! - The frontier scheduler that drives the worker pool to completion

mod aggregator;
mod extractor;
mod fetcher;
mod registry;
mod scheduler;

pub use aggregator::{Aggregator, CrawlResult, TaskRecord};
pub use extractor::{extract_page, DiscoveryBatch};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use registry::VisitedRegistry;
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::SpanError;

/// Runs a complete crawl from the given seed URL
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Fetch and extract the seed page
/// 3. Drive the worker pool until no outstanding work remains
/// 4. Return the final crawl result in first-discovery order
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed_url` - The absolute URL to start from
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl ran to completion
/// * `Err(SpanError)` - The seed URL was malformed or the client could not be built
pub async fn crawl(config: Config, seed_url: &str) -> Result<CrawlResult, SpanError> {
    let scheduler = Scheduler::new(config)?;
    scheduler.run(seed_url).await
}
