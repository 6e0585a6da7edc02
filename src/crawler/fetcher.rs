//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client
//! - GET requests with redirect-aware final URLs
//! - Content-type inspection before link extraction
//! - Error classification
//!
//! A fetch never propagates an error to the caller; every failure mode is
//! folded into a [`FetchOutcome`] variant so the crawl can continue.

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched a parseable page
    Fetched {
        /// Page body content
        body: String,
        /// Final URL after redirects, the anchor for relative link resolution
        final_url: Url,
    },

    /// The response carried a content type link extraction cannot handle.
    /// This is a deliberate skip flagged for manual follow-up, not an error.
    Unparseable {
        /// The URL that was skipped
        url: String,
        /// The Content-Type header that triggered the skip
        content_type: String,
    },

    /// The fetch failed: network error, timeout, or non-2xx status.
    /// Terminal for this URL in this run; no retries.
    Failed {
        /// The URL that failed
        url: String,
        /// Human-readable failure reason
        reason: String,
    },
}

/// Builds the HTTP client shared by every fetch in a crawl
///
/// # Arguments
///
/// * `user_agent` - User agent string sent with every request
/// * `timeout` - Total per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Performs a single GET through the shared client. Redirects are followed by
/// the client; the URL reported back in `final_url` is the post-redirect one
/// so relative links on the page resolve against the right base.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Failed {
                url: url.to_string(),
                reason: classify_request_error(&e),
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Failed {
            url: url.to_string(),
            reason: format!("HTTP {}", status.as_u16()),
        };
    }

    let final_url = response.url().clone();

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if is_unparseable_content_type(&content_type) {
        return FetchOutcome::Unparseable {
            url: url.to_string(),
            content_type,
        };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Fetched { body, final_url },
        Err(e) => FetchOutcome::Failed {
            url: url.to_string(),
            reason: classify_request_error(&e),
        },
    }
}

/// Classifies a reqwest error into a short failure reason
fn classify_request_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    }
}

/// Decides whether a Content-Type rules out link extraction
///
/// Anything in the `application/x*` family is skipped outright, as are
/// non-markup types like images or PDFs. An absent header is treated as
/// markup and parsed best-effort.
fn is_unparseable_content_type(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();

    if ct.is_empty() {
        return false;
    }

    if ct.starts_with("application/x") {
        return true;
    }

    !(ct.starts_with("text/") || ct.contains("html") || ct.contains("xml"))
}
