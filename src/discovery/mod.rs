//! Snapshot discovery
//!
//! A discovery provider turns a site into the list of archived robots.txt
//! snapshot URLs to fetch. Provider failures are fatal to the run; an empty
//! list is not an error at this layer.

mod wayback;

pub use wayback::{snapshot_url, WaybackProvider};

use crate::Result;
use std::future::Future;

/// Source of candidate snapshot URLs for a site
pub trait DiscoveryProvider {
    /// Returns absolute snapshot URLs for `site`
    fn discover(&self, site: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Provider returning a fixed list of snapshot URLs, whatever the site
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    urls: Vec<String>,
}

impl StaticProvider {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

impl DiscoveryProvider for StaticProvider {
    async fn discover(&self, _site: &str) -> Result<Vec<String>> {
        Ok(self.urls.clone())
    }
}
