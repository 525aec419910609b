//! Robofinder: harvests paths from archived robots.txt snapshots
//!
//! This crate discovers historical snapshots of a site's robots.txt through a
//! web archive index, fetches them concurrently with retry semantics, extracts
//! crawl directives from every snapshot and produces a deduplicated path list.

pub mod config;
pub mod crawler;
pub mod discovery;
pub mod output;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for Robofinder operations
///
/// Individual snapshot fetch failures never surface here; the fetcher absorbs
/// them. Only run-level conditions propagate to the caller.
#[derive(Debug, Error)]
pub enum RoboError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot discovery failed for {url}: {source}")]
    Discovery { url: String, source: reqwest::Error },

    #[error("Unreadable archive index response from {url}: {source}")]
    DiscoveryFormat {
        url: String,
        source: serde_json::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No paths found")]
    NoResults,

    #[error("Interrupted")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RoboError {
    /// Process exit code for this error
    ///
    /// | Condition | Code |
    /// |-----------|------|
    /// | Configuration, discovery, IO | 1 |
    /// | No paths found | 2 |
    /// | Interrupted | 130 |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NoResults => 2,
            Self::Interrupted => 130,
            _ => 1,
        }
    }
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Robofinder operations
pub type Result<T> = std::result::Result<T, RoboError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_pipeline, Coordinator, Shutdown};
pub use discovery::{DiscoveryProvider, WaybackProvider};
pub use robots::{extract, DirectiveExtractor, ExtractionScope};
pub use crate::url::{is_absolute_url, normalize_path};
