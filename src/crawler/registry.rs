//! Visited registry: the deduplication authority for one crawl run
//!
//! Every URL that should ever be fetched through the worker pool must be
//! claimed here first. The registry exposes no separate membership check;
//! `claim` is the only way in, so callers cannot split the membership test
//! from the insert and race each other into duplicate fetches.

use std::collections::HashSet;
use std::sync::Mutex;

/// Append-only set of URLs claimed for processing, plus their claim order
pub struct VisitedRegistry {
    inner: Mutex<RegistryInner>,
}

struct RegistryInner {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl VisitedRegistry {
    /// Creates an empty registry for a new crawl run
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                seen: HashSet::new(),
                order: Vec::new(),
            }),
        }
    }

    /// Atomically tests membership and inserts if absent
    ///
    /// Returns `true` iff this call performed the insertion; the caller then
    /// owns scheduling work for the URL. Membership test and insert happen
    /// under one lock acquisition, so concurrent claims of the same URL
    /// yield exactly one winner.
    pub fn claim(&self, url: &str) -> bool {
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        if inner.seen.insert(url.to_string()) {
            inner.order.push(url.to_string());
            true
        } else {
            false
        }
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.inner.lock().expect("registry lock poisoned").seen.len()
    }

    /// True when nothing has been claimed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All claimed URLs in first-claim order
    pub fn snapshot(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("registry lock poisoned")
            .order
            .clone()
    }
}

impl Default for VisitedRegistry {
    fn default() -> Self {
        Self::new()
    }
}
