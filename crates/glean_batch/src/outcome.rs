//! Per-object task outcomes.

use glean_core::RunStats;
use glean_error::BatchError;

/// What happened to one listed object.
#[derive(Debug, Clone)]
pub enum ObjectOutcome {
    /// Sidecar written
    Processed,
    /// Sidecar already present
    SkippedExisting,
    /// Extension not recognised
    SkippedUnsupported,
    /// Recognised kind that is not analyzed yet (video)
    SkippedPending,
    /// Probe, fetch, analysis or write failed
    Failed(BatchError),
}

impl ObjectOutcome {
    /// Count this outcome. Each outcome increments exactly one counter.
    pub fn record(&self, stats: &mut RunStats) {
        match self {
            ObjectOutcome::Processed => stats.record_processed(),
            ObjectOutcome::SkippedExisting
            | ObjectOutcome::SkippedUnsupported
            | ObjectOutcome::SkippedPending => stats.record_skipped(),
            ObjectOutcome::Failed(_) => stats.record_error(),
        }
    }
}

impl FromIterator<ObjectOutcome> for RunStats {
    fn from_iter<I: IntoIterator<Item = ObjectOutcome>>(iter: I) -> Self {
        let mut stats = RunStats::new();
        for outcome in iter {
            outcome.record(&mut stats);
        }
        stats
    }
}
