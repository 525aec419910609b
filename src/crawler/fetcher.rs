//! HTTP fetcher implementation
//!
//! This module handles snapshot retrieval for the harvester, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - Lazily creating one client per worker (the connection provider)
//! - Retry logic with a fixed backoff between attempts
//! - Error classification for diagnostics

use crate::config::FetchConfig;
use crate::crawler::shutdown::Shutdown;
use reqwest::Client;
use std::time::Duration;

/// Retry behavior for a single snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed wait after every failed attempt
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self::new(config.max_retries, config.backoff())
    }
}

/// How a snapshot fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The snapshot body (possibly empty)
    Body(String),
    /// Every attempt failed
    Exhausted,
    /// Shutdown was signalled before the fetch finished
    Cancelled,
}

/// Result of fetching one snapshot URL
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub outcome: FetchOutcome,
    /// Attempts actually made
    pub attempts: u32,
}

impl FetchResult {
    /// Consumes the result, yielding the body on success
    pub fn into_body(self) -> Option<String> {
        match self.outcome {
            FetchOutcome::Body(body) => Some(body),
            FetchOutcome::Exhausted | FetchOutcome::Cancelled => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Worker-owned HTTP session
///
/// The client is built on first use and kept for the lifetime of the owning
/// worker, so consecutive fetches reuse its pooled connections. A provider is
/// never shared between workers.
#[derive(Debug)]
pub struct ConnectionProvider {
    config: FetchConfig,
    client: Option<Client>,
    builds: usize,
}

impl ConnectionProvider {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            config,
            client: None,
            builds: 0,
        }
    }

    /// Returns the worker's client, building it on first call
    pub fn session(&mut self) -> Result<&Client, reqwest::Error> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                let client = build_http_client(&self.config)?;
                self.builds += 1;
                client
            }
        };
        let client: &Client = self.client.insert(client);
        Ok(client)
    }

    /// Returns true once the client has been built
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Number of clients built so far
    pub fn builds(&self) -> usize {
        self.builds
    }
}

/// Fetches one snapshot with retry logic
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx with readable body | Return body (empty bodies included) |
/// | Non-2xx status | Retry after backoff |
/// | Timeout | Retry after backoff |
/// | Connection error | Retry after backoff |
/// | Any other request error | Retry after backoff |
/// | Shutdown signalled | Abandon immediately |
///
/// The backoff is applied after every failed attempt, including the last.
/// Failures are logged at debug level and never returned as errors.
pub async fn fetch_with_retry(
    provider: &mut ConnectionProvider,
    url: &str,
    policy: &RetryPolicy,
    shutdown: &Shutdown,
) -> FetchResult {
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        if shutdown.is_triggered() {
            return cancelled(url, attempts);
        }
        attempts += 1;

        let result = tokio::select! {
            _ = shutdown.wait() => return cancelled(url, attempts),
            result = attempt(provider, url) => result,
        };

        match result {
            Ok(body) => {
                tracing::debug!("Fetched {} ({} bytes, attempt {})", url, body.len(), attempts);
                return FetchResult {
                    url: url.to_string(),
                    outcome: FetchOutcome::Body(body),
                    attempts,
                };
            }
            Err(e) if e.is_timeout() => {
                tracing::debug!("Timeout error for {} (attempt {}). Retrying...", url, attempts);
            }
            Err(e) if e.is_connect() => {
                tracing::debug!("Connection error for {} (attempt {}). Retrying...", url, attempts);
            }
            Err(e) => {
                tracing::debug!("Request error for {}: {} (attempt {}). Retrying...", url, e, attempts);
            }
        }

        tokio::select! {
            _ = shutdown.wait() => return cancelled(url, attempts),
            _ = tokio::time::sleep(policy.backoff) => {}
        }
    }

    tracing::debug!("Giving up on {} after {} attempts", url, attempts);
    FetchResult {
        url: url.to_string(),
        outcome: FetchOutcome::Exhausted,
        attempts,
    }
}

/// Makes a single GET request, treating non-2xx statuses as errors
async fn attempt(provider: &mut ConnectionProvider, url: &str) -> Result<String, reqwest::Error> {
    let client = provider.session()?;
    tracing::debug!("HTTP request sent to {}", url);
    let response = client.get(url).send().await?.error_for_status()?;
    response.text().await
}

fn cancelled(url: &str, attempts: u32) -> FetchResult {
    FetchResult {
        url: url.to_string(),
        outcome: FetchOutcome::Cancelled,
        attempts,
    }
}
