use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of concurrent snapshot fetches
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Main configuration structure for Robofinder
///
/// Every field has a default so that an empty TOML file (or no file at all)
/// yields a usable configuration once the target site is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Target site (domain or URL) whose robots.txt history is harvested
    pub site: String,

    /// File to write the final path list to
    pub output: Option<PathBuf>,

    /// Maximum number of snapshots fetched at once
    pub concurrency: usize,

    /// Join extracted paths onto the site URL
    pub concatenate: bool,

    /// Let every known keyword open a directive candidate
    pub all_directives: bool,

    pub fetch: FetchConfig,
    pub discovery: DiscoveryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: String::new(),
            output: None,
            concurrency: DEFAULT_CONCURRENCY,
            concatenate: false,
            all_directives: false,
            fetch: FetchConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// Snapshot fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Total attempts per snapshot, including the first
    pub max_retries: u32,

    /// Fixed wait after a failed attempt (milliseconds)
    pub backoff_ms: u64,

    /// Whole-request timeout (seconds)
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl FetchConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_ms: 1000,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Snapshot discovery settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Base URL of the web archive serving the CDX index and snapshots
    pub archive_url: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            archive_url: "https://web.archive.org".to_string(),
        }
    }
}
