use serde::Deserialize;

/// Main configuration structure for webspan
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Number of concurrently executing fetch tasks
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Suffix appended to a seed URL that does not end in a path separator
    #[serde(rename = "seed-suffix", default = "default_seed_suffix")]
    pub seed_suffix: String,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            fetch_timeout_secs: default_fetch_timeout(),
            seed_suffix: default_seed_suffix(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_workers() -> usize {
    4
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_seed_suffix() -> String {
    "/html".to_string()
}

fn default_user_agent() -> String {
    format!("webspan/{}", env!("CARGO_PKG_VERSION"))
}
