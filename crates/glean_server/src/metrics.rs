//! Metrics collection for triggered runs.

use glean_core::{RunReport, RunStats};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector shared by the run bot and the HTTP surface.
#[derive(Debug, Clone)]
pub struct TriggerMetrics {
    inner: Arc<TriggerMetricsInner>,
}

#[derive(Debug)]
struct TriggerMetricsInner {
    // Run counts
    runs: AtomicU64,
    aborted_runs: AtomicU64,

    // Cumulative object counters
    processed: AtomicU64,
    skipped: AtomicU64,
    errors: AtomicU64,

    last_success: parking_lot::Mutex<Option<Instant>>,
    last_report: parking_lot::Mutex<Option<RunReport>>,
}

impl Default for TriggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TriggerMetricsInner {
                runs: AtomicU64::new(0),
                aborted_runs: AtomicU64::new(0),
                processed: AtomicU64::new(0),
                skipped: AtomicU64::new(0),
                errors: AtomicU64::new(0),
                last_success: parking_lot::Mutex::new(None),
                last_report: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Records a finished run.
    pub fn record(&self, report: &RunReport) {
        let inner = &self.inner;
        inner.runs.fetch_add(1, Ordering::Relaxed);
        inner
            .processed
            .fetch_add(report.stats.processed, Ordering::Relaxed);
        inner.skipped.fetch_add(report.stats.skipped, Ordering::Relaxed);
        inner.errors.fetch_add(report.stats.errors, Ordering::Relaxed);

        if report.is_success() {
            *inner.last_success.lock() = Some(Instant::now());
        } else {
            inner.aborted_runs.fetch_add(1, Ordering::Relaxed);
        }

        *inner.last_report.lock() = Some(report.clone());
    }

    /// Gets the number of finished runs.
    pub fn runs(&self) -> u64 {
        self.inner.runs.load(Ordering::Relaxed)
    }

    /// Gets the number of aborted runs.
    pub fn aborted_runs(&self) -> u64 {
        self.inner.aborted_runs.load(Ordering::Relaxed)
    }

    /// Gets object counters summed over all runs.
    pub fn totals(&self) -> RunStats {
        RunStats {
            processed: self.inner.processed.load(Ordering::Relaxed),
            skipped: self.inner.skipped.load(Ordering::Relaxed),
            errors: self.inner.errors.load(Ordering::Relaxed),
        }
    }

    /// Gets time since the last completed run.
    pub fn time_since_success(&self) -> Option<std::time::Duration> {
        self.inner
            .last_success
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs: self.runs(),
            aborted_runs: self.aborted_runs(),
            totals: self.totals(),
            seconds_since_success: self.time_since_success().map(|d| d.as_secs()),
            last_report: self.inner.last_report.lock().clone(),
        }
    }
}

/// Serializable snapshot of trigger metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Number of finished runs
    pub runs: u64,
    /// Number of runs aborted by a listing failure
    pub aborted_runs: u64,
    /// Object counters summed over all runs
    pub totals: RunStats,
    /// Seconds since the last completed run
    pub seconds_since_success: Option<u64>,
    /// Report of the most recent run
    pub last_report: Option<RunReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use glean_core::RunStatus;

    fn report(processed: u64, errors: u64, status: RunStatus) -> RunReport {
        RunReport {
            stats: RunStats {
                processed,
                skipped: 1,
                errors,
            },
            status,
            pages: 1,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_metrics() {
        let snapshot = TriggerMetrics::new().snapshot();
        assert_eq!(snapshot.runs, 0);
        assert_eq!(snapshot.totals, RunStats::default());
        assert!(snapshot.seconds_since_success.is_none());
        assert!(snapshot.last_report.is_none());
    }

    #[test]
    fn test_records_accumulate() {
        let metrics = TriggerMetrics::new();
        metrics.record(&report(3, 0, RunStatus::Completed));
        metrics.record(&report(
            1,
            2,
            RunStatus::Aborted {
                reason: "listing failed".to_string(),
            },
        ));

        assert_eq!(metrics.runs(), 2);
        assert_eq!(metrics.aborted_runs(), 1);
        assert_eq!(
            metrics.totals(),
            RunStats {
                processed: 4,
                skipped: 2,
                errors: 2
            }
        );
        assert!(metrics.time_since_success().is_some());

        let snapshot = metrics.snapshot();
        let last = snapshot.last_report.unwrap();
        assert!(!last.is_success());
    }

    #[test]
    fn test_aborted_run_is_not_a_success() {
        let metrics = TriggerMetrics::new();
        metrics.record(&report(
            0,
            1,
            RunStatus::Aborted {
                reason: "listing failed".to_string(),
            },
        ));
        assert!(metrics.time_since_success().is_none());
    }
}
