//! Harvest coordinator - main pipeline orchestration logic
//!
//! This module ties the stages of a run together:
//! - Discovering snapshot URLs
//! - Fetching every snapshot on the worker pool
//! - Extracting directives and folding them into one path set
//! - Optionally joining paths onto the site URL

use crate::config::Config;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::shutdown::Shutdown;
use crate::discovery::DiscoveryProvider;
use crate::output::RunSummary;
use crate::robots::{DirectiveExtractor, ExtractionScope};
use crate::url::normalize_path;
use crate::{Result, RoboError};
use std::collections::BTreeSet;

/// Final product of a run
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    /// Unique paths, sorted
    pub paths: Vec<String>,
    pub summary: RunSummary,
}

/// Main pipeline coordinator structure
pub struct Coordinator<P> {
    config: Config,
    provider: P,
    scheduler: Scheduler,
    extractor: DirectiveExtractor,
}

impl<P: DiscoveryProvider> Coordinator<P> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    /// * `provider` - Source of snapshot URLs
    pub fn new(config: Config, provider: P) -> Self {
        let scheduler = Scheduler::new(config.concurrency, config.fetch.clone());
        let scope = if config.all_directives {
            ExtractionScope::AllKeywords
        } else {
            ExtractionScope::PathTriggers
        };

        Self {
            scheduler,
            extractor: DirectiveExtractor::new(scope),
            config,
            provider,
        }
    }

    /// Runs discovery, fetching and extraction
    ///
    /// # Returns
    ///
    /// * `Ok(Harvest)` - At least one path was found
    /// * `Err(RoboError::NoResults)` - No snapshots, or no directives in any of them
    /// * `Err(RoboError::Interrupted)` - Shutdown was signalled mid-run
    /// * `Err(RoboError::Discovery)` - The provider failed
    pub async fn run(&self, shutdown: &Shutdown) -> Result<Harvest> {
        let site = self.config.site.as_str();
        let mut summary = RunSummary::default();

        let urls = tokio::select! {
            _ = shutdown.wait() => return Err(RoboError::Interrupted),
            urls = self.provider.discover(site) => urls?,
        };
        summary.snapshots_discovered = urls.len();

        if urls.is_empty() {
            tracing::warn!("No robots.txt snapshots found for {}", site);
            return Err(RoboError::NoResults);
        }

        tracing::info!(
            "Fetching {} robots.txt snapshots with {} workers",
            urls.len(),
            self.scheduler.concurrency()
        );
        let batch = self.scheduler.run_all(urls, shutdown).await?;
        summary.snapshots_fetched = batch.stats.fetched;
        summary.snapshots_failed = batch.stats.failed;

        tracing::debug!("Extracting paths from {} robots.txt files", batch.bodies.len());
        let mut path_set = BTreeSet::new();
        for body in &batch.bodies {
            for directive in self.extractor.extract(body) {
                summary.directives_extracted += 1;
                path_set.insert(directive);
            }
        }

        if path_set.is_empty() {
            tracing::warn!("No paths found for {}", site);
            return Err(RoboError::NoResults);
        }

        if self.config.concatenate {
            tracing::debug!("Concatenating paths with {}", site);
            // Distinct raw paths can collapse to one URL ("/a" and "a")
            path_set = path_set
                .into_iter()
                .map(|path| normalize_path(&path, site))
                .collect();
        }

        summary.unique_paths = path_set.len();
        if summary.is_partial() {
            tracing::warn!(
                "{} of {} snapshots could not be fetched ({:.0}% fetched)",
                summary.snapshots_failed,
                summary.snapshots_discovered,
                summary.fetch_rate() * 100.0
            );
        }
        tracing::info!("Total paths found: {}", summary.unique_paths);

        Ok(Harvest {
            paths: path_set.into_iter().collect(),
            summary,
        })
    }
}
