//! Configuration module for Robofinder
//!
//! Settings come from command-line flags, optionally layered over a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use robofinder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("robofinder.toml")).unwrap();
//! println!("Snapshots fetched {} at a time", config.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DiscoveryConfig, FetchConfig, DEFAULT_CONCURRENCY};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
