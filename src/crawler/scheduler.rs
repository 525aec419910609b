//! Bounded worker pool for snapshot fetching
//!
//! This module handles:
//! - Fanning a finite URL list out to at most `concurrency` workers
//! - Giving each worker its own connection provider
//! - Collecting successful bodies in completion order
//! - Stopping promptly when shutdown is signalled

use crate::config::FetchConfig;
use crate::crawler::fetcher::{fetch_with_retry, ConnectionProvider, FetchOutcome, RetryPolicy};
use crate::crawler::shutdown::Shutdown;
use crate::{Result, RoboError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Shared list of snapshot URLs still waiting for a worker
type WorkQueue = Arc<Mutex<VecDeque<String>>>;

/// Per-run fetch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub fetched: usize,
    pub failed: usize,
}

/// Successful bodies plus counters for one batch
#[derive(Debug, Default)]
pub struct FetchBatch {
    /// Bodies in completion order
    pub bodies: Vec<String>,
    pub stats: FetchStats,
}

/// Scheduler runs snapshot fetches on a bounded pool of workers
///
/// The whole URL list is known before the fan-out starts. Workers pull from
/// a shared queue until it is empty, so no more than `concurrency` requests
/// are ever in flight.
#[derive(Debug, Clone)]
pub struct Scheduler {
    concurrency: usize,
    policy: RetryPolicy,
    fetch_config: FetchConfig,
}

/// What a worker reports back for each URL it handled
enum WorkerEvent {
    Fetched(String),
    Failed,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `concurrency` - Maximum number of workers (clamped to at least 1)
    /// * `fetch_config` - Client settings and retry behavior for every worker
    pub fn new(concurrency: usize, fetch_config: FetchConfig) -> Self {
        Self {
            concurrency: concurrency.max(1),
            policy: RetryPolicy::from(&fetch_config),
            fetch_config,
        }
    }

    /// Overrides the retry policy derived from the fetch configuration
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetches every URL and returns the bodies that arrived
    ///
    /// Failed snapshots are dropped silently. If shutdown is signalled the
    /// remaining workers are aborted, partial results are discarded and
    /// `RoboError::Interrupted` is returned.
    pub async fn run_all(&self, urls: Vec<String>, shutdown: &Shutdown) -> Result<FetchBatch> {
        let worker_count = self.concurrency.min(urls.len());
        let queue: WorkQueue = Arc::new(Mutex::new(urls.into()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();

        tracing::debug!("Starting {} fetch workers", worker_count);
        for worker_id in 0..worker_count {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let shutdown = shutdown.clone();
            let provider = ConnectionProvider::new(self.fetch_config.clone());
            let policy = self.policy;
            workers.spawn(run_worker(worker_id, queue, provider, policy, shutdown, tx));
        }
        // Workers hold the remaining senders; the channel closes when the last one exits
        drop(tx);

        let mut batch = FetchBatch::default();
        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    tracing::debug!("Shutdown signalled, aborting fetch workers");
                    workers.abort_all();
                    while workers.join_next().await.is_some() {}
                    return Err(RoboError::Interrupted);
                }
                event = rx.recv() => match event {
                    Some(WorkerEvent::Fetched(body)) => {
                        batch.stats.fetched += 1;
                        batch.bodies.push(body);
                    }
                    Some(WorkerEvent::Failed) => batch.stats.failed += 1,
                    None => break,
                },
            }
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Fetch worker ended abnormally: {}", e);
            }
        }

        if shutdown.is_triggered() {
            return Err(RoboError::Interrupted);
        }

        tracing::debug!(
            "Fetch batch complete: {} fetched, {} failed",
            batch.stats.fetched,
            batch.stats.failed
        );
        Ok(batch)
    }
}

/// Pops the next URL, releasing the lock before any await
fn next_url(queue: &WorkQueue) -> Option<String> {
    match queue.lock() {
        Ok(mut pending) => pending.pop_front(),
        Err(poisoned) => poisoned.into_inner().pop_front(),
    }
}

async fn run_worker(
    worker_id: usize,
    queue: WorkQueue,
    mut provider: ConnectionProvider,
    policy: RetryPolicy,
    shutdown: Shutdown,
    tx: mpsc::UnboundedSender<WorkerEvent>,
) {
    while !shutdown.is_triggered() {
        let Some(url) = next_url(&queue) else {
            break;
        };

        let result = fetch_with_retry(&mut provider, &url, &policy, &shutdown).await;
        let event = match result.outcome {
            FetchOutcome::Body(body) => WorkerEvent::Fetched(body),
            FetchOutcome::Exhausted => WorkerEvent::Failed,
            FetchOutcome::Cancelled => break,
        };

        if tx.send(event).is_err() {
            break;
        }
    }
    tracing::trace!(
        "Fetch worker {} exiting after building {} client(s)",
        worker_id,
        provider.builds()
    );
}
