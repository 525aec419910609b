//! Wayback Machine CDX index provider
//!
//! Queries the archive's CDX endpoint for every distinct, successfully
//! captured robots.txt of a site and maps each capture to its raw snapshot
//! URL (`/web/<timestamp>if_/<original>`).

use crate::config::{DiscoveryConfig, FetchConfig};
use crate::crawler::build_http_client;
use crate::discovery::DiscoveryProvider;
use crate::{Result, RoboError};
use reqwest::Client;

/// CDX field names, echoed back as the first row of a JSON response
const HEADER_ROW: [&str; 2] = ["timestamp", "original"];

/// Discovers robots.txt snapshots through the Wayback Machine CDX API
#[derive(Debug, Clone)]
pub struct WaybackProvider {
    client: Client,
    archive_url: String,
}

impl WaybackProvider {
    /// Creates a provider for the configured archive
    ///
    /// # Returns
    ///
    /// * `Ok(WaybackProvider)` - Provider ready to query
    /// * `Err(RoboError)` - The HTTP client could not be built
    pub fn new(discovery: &DiscoveryConfig, fetch: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(fetch)?,
            archive_url: discovery.archive_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the CDX search endpoint
    pub fn index_url(&self) -> String {
        format!("{}/cdx/search/cdx", self.archive_url)
    }

    async fn query_index(&self, site: &str) -> Result<String> {
        let index_url = self.index_url();
        let target = format!("{}/robots.txt", site);
        let discovery_error = |source: reqwest::Error| RoboError::Discovery {
            url: index_url.clone(),
            source,
        };

        let response = self
            .client
            .get(&index_url)
            .query(&[
                ("url", target.as_str()),
                ("output", "json"),
                ("fl", "timestamp,original"),
                ("filter", "statuscode:200"),
                ("collapse", "digest"),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(discovery_error)?;

        response.text().await.map_err(discovery_error)
    }

    /// Maps a CDX JSON payload to snapshot URLs
    ///
    /// The header row and rows with missing fields are skipped. A blank body
    /// means the archive holds no captures.
    fn parse_index(&self, body: &str) -> Result<Vec<String>> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<Vec<String>> =
            serde_json::from_str(body).map_err(|source| RoboError::DiscoveryFormat {
                url: self.index_url(),
                source,
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| match row.as_slice() {
                [timestamp, original, ..] if [timestamp.as_str(), original.as_str()] != HEADER_ROW => {
                    Some(snapshot_url(&self.archive_url, timestamp, original))
                }
                _ => None,
            })
            .collect())
    }
}

impl DiscoveryProvider for WaybackProvider {
    async fn discover(&self, site: &str) -> Result<Vec<String>> {
        tracing::debug!("Fetching robots.txt snapshot list for {} from the archive", site);
        let body = self.query_index(site).await?;
        let urls = self.parse_index(&body)?;
        tracing::debug!("Archive lists {} robots.txt snapshots", urls.len());
        Ok(urls)
    }
}

/// Builds the raw (unframed) snapshot URL for one capture
///
/// # Examples
///
/// ```
/// use robofinder::discovery::snapshot_url;
///
/// assert_eq!(
///     snapshot_url("https://web.archive.org", "20200101000000", "https://x.com/robots.txt"),
///     "https://web.archive.org/web/20200101000000if_/https://x.com/robots.txt"
/// );
/// ```
pub fn snapshot_url(archive_url: &str, timestamp: &str, original: &str) -> String {
    format!("{}/web/{}if_/{}", archive_url, timestamp, original)
}
