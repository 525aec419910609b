//! Crawler module for snapshot fetching and processing
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with retry logic
//! - A bounded worker pool with per-worker connections
//! - Cooperative shutdown
//! - Overall pipeline coordination

mod coordinator;
mod fetcher;
mod scheduler;
pub mod shutdown;

pub use coordinator::{Coordinator, Harvest};
pub use fetcher::{
    build_http_client, fetch_with_retry, ConnectionProvider, FetchOutcome, FetchResult, RetryPolicy,
};
pub use scheduler::{FetchBatch, FetchStats, Scheduler};
pub use shutdown::{Shutdown, ShutdownTrigger};

use crate::config::Config;
use crate::discovery::DiscoveryProvider;
use crate::output::{OutputHandler, RunSummary};
use crate::Result;

/// Runs a complete harvest and hands the result to every output
///
/// This is the main entry point for a run. It will:
/// 1. Discover snapshot URLs through `provider`
/// 2. Fetch all snapshots concurrently
/// 3. Extract and deduplicate directive values
/// 4. Optionally join them onto the site URL
/// 5. Write the final list to each output in turn
///
/// Nothing is written when the run fails, finds no paths, or is interrupted.
///
/// # Arguments
///
/// * `config` - A validated configuration
/// * `provider` - The discovery provider
/// * `outputs` - Destinations for the path list
/// * `shutdown` - Interrupt listener
///
/// # Returns
///
/// * `Ok(RunSummary)` - Paths were found and written
/// * `Err(RoboError)` - The run failed, found nothing, or was interrupted
pub async fn run_pipeline<P: DiscoveryProvider>(
    config: Config,
    provider: P,
    outputs: &mut [Box<dyn OutputHandler>],
    shutdown: &Shutdown,
) -> Result<RunSummary> {
    let coordinator = Coordinator::new(config, provider);
    write_harvest(&coordinator, outputs, shutdown).await
}

/// Runs an existing coordinator and writes its result to every output
pub async fn write_harvest<P: DiscoveryProvider>(
    coordinator: &Coordinator<P>,
    outputs: &mut [Box<dyn OutputHandler>],
    shutdown: &Shutdown,
) -> Result<RunSummary> {
    let harvest = coordinator.run(shutdown).await?;

    for output in outputs.iter_mut() {
        tracing::debug!("Writing output to {}", output.describe());
        output.write_paths(&harvest.paths)?;
    }

    Ok(harvest.summary)
}
