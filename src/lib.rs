//! Webspan: a breadth-expanding link mapper
//!
//! This crate implements a web crawler that starts from a single seed URL and
//! fans outward through every hyperlink and script source it can reach,
//! deduplicating across the whole run and reporting the discovered link set
//! in first-discovery order.

pub mod config;
pub mod crawler;
pub mod output;
pub mod resolver;

use thiserror::Error;

/// Main error type for webspan operations
#[derive(Debug, Error)]
pub enum SpanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No crawl target given; supply --url or --resolve")]
    MissingTarget,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for webspan operations
pub type Result<T> = std::result::Result<T, SpanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlResult, Scheduler, VisitedRegistry};
pub use resolver::ResolveOutcome;
