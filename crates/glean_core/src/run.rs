//! Run options, statistics and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Options for one orchestrator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Process objects even when a sidecar already exists, overwriting it
    #[serde(default)]
    pub force_reprocess: bool,
}

impl RunOptions {
    /// Options that reprocess every supported object.
    pub fn forced() -> Self {
        Self {
            force_reprocess: true,
        }
    }
}

/// Counters accumulated during one run.
///
/// Every non-sidecar object the listing returned increments exactly one
/// counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunStats {
    /// Objects whose sidecar was written
    pub processed: u64,
    /// Objects skipped (existing sidecar, unsupported or pending kind)
    pub skipped: u64,
    /// Objects (or listing pages) that failed
    pub errors: u64,
}

impl RunStats {
    /// Empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one processed object.
    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    /// Count one skipped object.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Count one failure.
    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Add another accumulator into this one.
    pub fn merge(&mut self, other: RunStats) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.processed + self.skipped + self.errors
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "processed={} skipped={} errors={}",
            self.processed, self.skipped, self.errors
        )
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Every page was listed; per-object errors may still be non-zero
    Completed,
    /// A listing page failed and the run stopped early
    Aborted {
        /// Why the run stopped
        reason: String,
    },
}

/// Outcome of one orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Counters at the end of the run
    pub stats: RunStats,
    /// Whether the run completed or was aborted
    #[serde(flatten)]
    pub status: RunStatus,
    /// Listing pages fully processed
    pub pages: u32,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Whether the run reached the end of the listing.
    pub fn is_success(&self) -> bool {
        matches!(self.status, RunStatus::Completed)
    }

    /// Abort reason, if the run ended early.
    pub fn abort_reason(&self) -> Option<&str> {
        match &self.status {
            RunStatus::Completed => None,
            RunStatus::Aborted { reason } => Some(reason),
        }
    }
}
