//! Existence gate: has this object already been processed?

use glean_core::{MediaObject, RunOptions, sidecar_key};
use glean_error::{BatchError, BatchErrorKind};
use glean_storage::ObjectStore;
use std::sync::Arc;
use tracing::instrument;

/// Decides per object whether a sidecar must be generated.
///
/// The sidecar's presence in the store is the only record of prior work, so
/// the gate probes it on every call and caches nothing.
#[derive(Clone)]
pub struct ExistenceGate {
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for ExistenceGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistenceGate")
            .field("backend", &self.store.backend())
            .finish()
    }
}

impl ExistenceGate {
    /// Create a gate probing `store`.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Whether `object` needs processing.
    ///
    /// With `force_reprocess` the answer is always yes and storage is not
    /// touched. Otherwise the object is processed iff its sidecar is absent.
    ///
    /// # Errors
    ///
    /// Returns [`BatchErrorKind::ExistenceProbe`] when the probe itself fails;
    /// the caller decides what that means for the run.
    #[instrument(skip(self, object, options), fields(key = %object.key()))]
    pub async fn should_process(
        &self,
        object: &MediaObject,
        options: &RunOptions,
    ) -> Result<bool, BatchError> {
        if options.force_reprocess {
            return Ok(true);
        }

        let probe = sidecar_key(object.key());
        let existing = self.store.head(&probe).await.map_err(|e| {
            BatchError::new(BatchErrorKind::ExistenceProbe {
                key: object.key().clone(),
                reason: e.to_string(),
            })
        })?;

        Ok(existing.is_none())
    }
}
