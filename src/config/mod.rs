//! Configuration loading and validation
//!
//! Webspan runs with built-in defaults; an optional TOML file can override
//! them, and CLI flags override the file. This module owns the typed
//! configuration, the TOML loader, and the validation pass.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig};
pub use validation::validate_config;
