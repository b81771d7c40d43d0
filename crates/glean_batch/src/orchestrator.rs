//! Paginated batch runs.

use crate::{ExistenceGate, ObjectOutcome};
use chrono::Utc;
use futures::future::join_all;
use glean_core::{
    MediaKind, MediaObject, MetadataRecord, RunOptions, RunReport, RunStats, RunStatus,
    SIDECAR_CONTENT_TYPE, is_sidecar, sidecar_key,
};
use glean_error::{BatchError, BatchErrorKind};
use glean_models::ContentAnalyzer;
use glean_storage::{DEFAULT_LIST_LIMIT, ListRequest, ObjectStore, PutOptions};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Drives one metadata generation run over an object store.
///
/// Pages are processed strictly in listing order. All candidate objects of a
/// page form one wave of concurrent tasks, and the next page is only
/// requested once every task of the wave has settled.
#[derive(Clone)]
pub struct BatchOrchestrator {
    store: Arc<dyn ObjectStore>,
    analyzer: Arc<dyn ContentAnalyzer>,
    gate: ExistenceGate,
    prefix: String,
    page_size: usize,
}

impl std::fmt::Debug for BatchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchOrchestrator")
            .field("backend", &self.store.backend())
            .field("analyzer", &self.analyzer.name())
            .field("prefix", &self.prefix)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl BatchOrchestrator {
    /// Create an orchestrator over the whole store with the default page size.
    pub fn new(store: Arc<dyn ObjectStore>, analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        Self {
            gate: ExistenceGate::new(Arc::clone(&store)),
            store,
            analyzer,
            prefix: String::new(),
            page_size: DEFAULT_LIST_LIMIT,
        }
    }

    /// Only consider keys under `prefix`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Objects requested per listing page (and so the widest wave).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Listing prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Listing page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run once over every page of the listing.
    ///
    /// Never fails: per-object errors are counted in `stats.errors`, and a
    /// listing failure adds one error and returns the partial stats with an
    /// [`RunStatus::Aborted`] status.
    #[instrument(skip(self, options), fields(prefix = %self.prefix, force = options.force_reprocess))]
    pub async fn run(&self, options: &RunOptions) -> RunReport {
        let started_at = Utc::now();
        let mut stats = RunStats::new();
        let mut cursor = None;
        let mut pages = 0u32;

        info!(backend = self.store.backend(), "Starting metadata run");

        let status = loop {
            let request = ListRequest::new(self.prefix.clone())
                .with_limit(self.page_size)
                .with_cursor(cursor.take());

            let page = match self.store.list(&request).await {
                Ok(page) => page,
                Err(e) => {
                    let err = BatchError::new(BatchErrorKind::Listing(e.to_string()));
                    error!(error = %err, pages, "Listing failed, aborting run");
                    stats.record_error();
                    break RunStatus::Aborted {
                        reason: err.kind().to_string(),
                    };
                }
            };

            let wave = self.process_page(page.objects, options).await;
            stats.merge(wave);
            pages += 1;
            debug!(page = pages, %wave, "Page settled");

            if !page.truncated {
                break RunStatus::Completed;
            }

            match page.cursor {
                Some(next) => cursor = Some(next),
                None => {
                    let err = BatchError::new(BatchErrorKind::Listing(
                        "store reported more pages without a cursor".to_string(),
                    ));
                    error!(error = %err, pages, "Listing cannot continue, aborting run");
                    stats.record_error();
                    break RunStatus::Aborted {
                        reason: err.kind().to_string(),
                    };
                }
            }
        };

        let report = RunReport {
            stats,
            status,
            pages,
            started_at,
            finished_at: Utc::now(),
        };

        match report.abort_reason() {
            None => info!(%report.stats, pages, "Metadata run completed"),
            Some(reason) => warn!(%report.stats, pages, reason, "Metadata run aborted"),
        }

        report
    }

    /// Process one page as a single wave and return its counters.
    async fn process_page(&self, objects: Vec<MediaObject>, options: &RunOptions) -> RunStats {
        let mut settled = Vec::with_capacity(objects.len());
        let mut wave = Vec::new();

        for object in objects {
            if is_sidecar(object.key()) {
                continue;
            }

            match MediaKind::classify(object.key()) {
                MediaKind::Unsupported => {
                    debug!(key = %object.key(), "Skipping unsupported object");
                    settled.push(ObjectOutcome::SkippedUnsupported);
                }
                MediaKind::Video => {
                    debug!(key = %object.key(), "Skipping video, not analyzed yet");
                    settled.push(ObjectOutcome::SkippedPending);
                }
                kind => wave.push(self.process_object(object, kind, options)),
            }
        }

        // Wait for every task; a failure never cancels its siblings.
        settled.extend(join_all(wave).await);
        settled.into_iter().collect()
    }

    /// Per-object task boundary: every error stops here.
    async fn process_object(
        &self,
        object: MediaObject,
        kind: MediaKind,
        options: &RunOptions,
    ) -> ObjectOutcome {
        match self.try_process_object(&object, kind, options).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(key = %object.key(), error = %e, "Failed to process object");
                ObjectOutcome::Failed(e)
            }
        }
    }

    #[instrument(skip(self, object, options), fields(key = %object.key()))]
    async fn try_process_object(
        &self,
        object: &MediaObject,
        kind: MediaKind,
        options: &RunOptions,
    ) -> Result<ObjectOutcome, BatchError> {
        if !self.gate.should_process(object, options).await? {
            debug!("Sidecar exists, skipping");
            return Ok(ObjectOutcome::SkippedExisting);
        }

        let key = object.key();
        let stored = self
            .store
            .get(key)
            .await
            .map_err(|e| {
                BatchError::new(BatchErrorKind::Fetch {
                    key: key.clone(),
                    reason: e.to_string(),
                })
            })?
            .ok_or_else(|| BatchError::new(BatchErrorKind::ObjectVanished(key.clone())))?;

        let analysis = self
            .analyzer
            .analyze(&stored.object, kind, &stored.body)
            .await
            .map_err(|e| {
                BatchError::new(BatchErrorKind::Analysis {
                    key: key.clone(),
                    reason: e.to_string(),
                })
            })?;

        // A record needs a caption or a summary; anything else is a failed analysis.
        if analysis.is_empty() {
            return Err(BatchError::new(BatchErrorKind::Analysis {
                key: key.clone(),
                reason: "empty content".to_string(),
            }));
        }

        let record = MetadataRecord::from_analysis(&stored.object, kind, analysis, Utc::now());
        let body = record.to_json_pretty().map_err(|e| {
            BatchError::new(BatchErrorKind::Serialize {
                key: key.clone(),
                reason: e.to_string(),
            })
        })?;

        self.store
            .put(
                &sidecar_key(key),
                body,
                &PutOptions::with_content_type(SIDECAR_CONTENT_TYPE),
            )
            .await
            .map_err(|e| {
                BatchError::new(BatchErrorKind::Write {
                    key: key.clone(),
                    reason: e.to_string(),
                })
            })?;

        info!(tags = record.tags.len(), "Wrote sidecar");
        Ok(ObjectOutcome::Processed)
    }
}
