//! Console rendering and file output for crawl results
//!
//! Console lines are styled with `colored`; the file writer emits the exact
//! same lines without styling, so a saved link list matches what was printed.

use crate::crawler::CrawlResult;
use crate::resolver::ResolveOutcome;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Formats one link-list line: 1-indexed, first-discovery order
fn link_line(index: usize, url: &str) -> String {
    format!("[{}] {}", index + 1, url)
}

/// Prints the final link list to the console
pub fn print_links(links: &[String]) {
    println!("\nOverall Output:");
    for (index, url) in links.iter().enumerate() {
        println!("{}", link_line(index, url).green());
    }
}

/// Prints the seed page's discovered form actions
pub fn print_seed_forms(forms: &[String]) {
    if forms.is_empty() {
        println!("\nNo forms discovered on the seed page.");
        return;
    }

    println!("\nDiscovered forms:");
    for action in forms {
        println!("{}", format!("  -> {}", action).cyan());
    }
}

/// Prints a one-line crawl summary
pub fn print_summary(result: &CrawlResult) {
    println!(
        "\n{} links discovered ({} pages fetched, {} failures, {} skipped)",
        result.links.len(),
        result.pages_fetched,
        result.fetch_failures,
        result.unparseable_skips
    );
}

/// Reports a failed fetch inline, as it happens
pub fn print_fetch_failure(url: &str, reason: &str) {
    println!(
        "{}",
        format!("Warning: Failed to retrieve {}: {}", url, reason).red()
    );
}

/// Reports an unparseable-content skip inline, as it happens
pub fn print_unparseable_advisory(url: &str) {
    println!(
        "{}",
        format!(
            "Warning: Could not extract links from {}. Please look into it manually.",
            url
        )
        .red()
    );
}

/// Prints per-hostname resolution outcomes
pub fn print_resolutions(outcomes: &[ResolveOutcome]) {
    println!("\nResolved addresses:");
    for outcome in outcomes {
        match outcome {
            ResolveOutcome::Resolved { host, addr } => {
                println!("{}", format!("{} -> {}", host, addr).green());
            }
            ResolveOutcome::Failed { host, reason } => {
                println!(
                    "{}",
                    format!("Warning: Could not resolve {}: {}", host, reason).red()
                );
            }
        }
    }
}

/// Writes the link list to a file, one unstyled line per URL
///
/// The lines are identical to the console output minus color codes, in the
/// same first-discovery order. Any existing file content is replaced.
pub fn write_links(path: &Path, links: &[String]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    for (index, url) in links.iter().enumerate() {
        writeln!(file, "{}", link_line(index, url))?;
    }
    Ok(())
}
