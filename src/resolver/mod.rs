//! Hostname-to-IP resolution for a file of targets
//!
//! A side feature independent of crawling: given a file with one hostname
//! per line, resolve each through the system resolver and report every line
//! individually. One failed lookup never stops the rest of the batch.

use crate::SpanError;
use std::net::IpAddr;
use std::path::Path;

/// Outcome of resolving a single hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The hostname resolved; `addr` is the first address returned
    Resolved { host: String, addr: IpAddr },

    /// The lookup failed
    Failed { host: String, reason: String },
}

/// Resolves one hostname through the system resolver
pub async fn resolve_host(host: &str) -> ResolveOutcome {
    // lookup_host needs a port; 0 works for pure name resolution
    match tokio::net::lookup_host((host, 0)).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => ResolveOutcome::Resolved {
                host: host.to_string(),
                addr: addr.ip(),
            },
            None => ResolveOutcome::Failed {
                host: host.to_string(),
                reason: "no addresses returned".to_string(),
            },
        },
        Err(e) => ResolveOutcome::Failed {
            host: host.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Resolves every hostname listed in a file, one per line
///
/// Blank lines are skipped. Returns one outcome per processed line, in file
/// order. Errors only if the file itself cannot be read.
pub async fn resolve_hosts_file(path: &Path) -> Result<Vec<ResolveOutcome>, SpanError> {
    let content = std::fs::read_to_string(path)?;

    let mut outcomes = Vec::new();
    for line in content.lines() {
        let host = line.trim();
        if host.is_empty() {
            continue;
        }

        let outcome = resolve_host(host).await;
        if let ResolveOutcome::Failed { host, reason } = &outcome {
            tracing::warn!("Resolution failed for {}: {}", host, reason);
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
