//! Output handler traits and types

use std::io;

/// Counters describing one harvest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Snapshot URLs returned by discovery
    pub snapshots_discovered: usize,
    /// Snapshots fetched successfully
    pub snapshots_fetched: usize,
    /// Snapshots that failed after every retry
    pub snapshots_failed: usize,
    /// Directive values extracted, duplicates included
    pub directives_extracted: usize,
    /// Unique paths in the final list
    pub unique_paths: usize,
}

impl RunSummary {
    /// Fraction of discovered snapshots that were fetched (0.0 - 1.0)
    pub fn fetch_rate(&self) -> f64 {
        if self.snapshots_discovered == 0 {
            return 0.0;
        }
        self.snapshots_fetched as f64 / self.snapshots_discovered as f64
    }

    /// True when some snapshots could not be fetched
    pub fn is_partial(&self) -> bool {
        self.snapshots_failed > 0
    }
}

/// Trait for path list destinations
///
/// Handlers receive the final, deduplicated path list exactly once per run.
pub trait OutputHandler {
    /// Writes the path list, one path per line
    fn write_paths(&mut self, paths: &[String]) -> io::Result<()>;

    /// Short human-readable description used in log messages
    fn describe(&self) -> String;
}
