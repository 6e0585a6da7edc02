//! Result aggregation for a crawl run
//!
//! The aggregator is fed one outcome per completed task (plus the seed) and
//! produces the final immutable [`CrawlResult`] once the scheduler reports
//! completion. Link ordering in the result is the registry's first-claim
//! order, which is deterministic for a given run even though task completion
//! order is not.

use crate::crawler::extractor::DiscoveryBatch;
use crate::crawler::fetcher::FetchOutcome;
use crate::crawler::registry::VisitedRegistry;

/// One processed task as seen by the aggregator
#[derive(Debug)]
pub enum TaskRecord {
    /// The page was fetched and extracted
    Processed { batch: DiscoveryBatch },

    /// The page was skipped because its content type cannot be parsed
    Skipped { url: String, content_type: String },

    /// The fetch failed
    Failed { url: String, reason: String },
}

impl TaskRecord {
    /// Builds a record from a fetch outcome and the batch extracted from it
    ///
    /// `batch` is ignored for non-success outcomes, which contribute zero
    /// discoveries by definition.
    pub fn from_outcome(outcome: &FetchOutcome, batch: DiscoveryBatch) -> Self {
        match outcome {
            FetchOutcome::Fetched { .. } => TaskRecord::Processed { batch },
            FetchOutcome::Unparseable { url, content_type } => TaskRecord::Skipped {
                url: url.clone(),
                content_type: content_type.clone(),
            },
            FetchOutcome::Failed { url, reason } => TaskRecord::Failed {
                url: url.clone(),
                reason: reason.clone(),
            },
        }
    }
}

/// Collects per-task outcomes while the scheduler drains
#[derive(Debug, Default)]
pub struct Aggregator {
    pages_fetched: usize,
    fetch_failures: usize,
    unparseable_skips: usize,
    forms_seen: usize,
    seed_forms: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retains the seed page's form actions
    ///
    /// Only the seed page's forms are surfaced in the final report; forms on
    /// later pages are counted through `record` but not listed.
    pub fn record_seed_forms(&mut self, forms: &[String]) {
        self.seed_forms = forms.to_vec();
    }

    /// Records one completed task; called exactly once per task
    pub fn record(&mut self, record: &TaskRecord) {
        match record {
            TaskRecord::Processed { batch } => {
                self.pages_fetched += 1;
                self.forms_seen += batch.forms.len();
            }
            TaskRecord::Skipped { .. } => {
                self.unparseable_skips += 1;
            }
            TaskRecord::Failed { .. } => {
                self.fetch_failures += 1;
            }
        }
    }

    /// Produces the final result; meaningful only after the scheduler has
    /// reported completion, since it freezes the registry contents
    pub fn snapshot(&self, registry: &VisitedRegistry) -> CrawlResult {
        CrawlResult {
            links: registry.snapshot(),
            seed_forms: self.seed_forms.clone(),
            pages_fetched: self.pages_fetched,
            fetch_failures: self.fetch_failures,
            unparseable_skips: self.unparseable_skips,
            forms_seen: self.forms_seen,
        }
    }
}

/// The immutable outcome of a completed crawl
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Every URL ever claimed, in first-claim order
    pub links: Vec<String>,

    /// Form actions discovered on the seed page
    pub seed_forms: Vec<String>,

    /// Pages fetched and extracted successfully (seed included)
    pub pages_fetched: usize,

    /// Fetches that failed with a network error, timeout, or non-2xx status
    pub fetch_failures: usize,

    /// Pages skipped because of an unparseable content type
    pub unparseable_skips: usize,

    /// Form actions seen across all pages, listed or not
    pub forms_seen: usize,
}
