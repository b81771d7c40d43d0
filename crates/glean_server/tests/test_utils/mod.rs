//! Test doubles for trigger tests.

#![allow(dead_code)]

use glean_batch::BatchOrchestrator;
use glean_core::{Analysis, MediaKind, MediaObject};
use glean_error::{AnalyzerError, StorageError, StorageErrorKind};
use glean_models::ContentAnalyzer;
use glean_server::{RunBot, RunHandle, TriggerMetrics};
use glean_storage::{
    ListPage, ListRequest, MemoryStore, ObjectStore, PutOptions, StorageResult, StoredObject,
};
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Analyzer that captions every object after its key.
#[derive(Debug, Default)]
pub struct EchoAnalyzer {
    calls: AtomicUsize,
}

impl EchoAnalyzer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContentAnalyzer for EchoAnalyzer {
    fn name(&self) -> &str {
        "echo"
    }

    async fn analyze(
        &self,
        object: &MediaObject,
        _kind: MediaKind,
        _body: &[u8],
    ) -> Result<Analysis, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Analysis {
            caption: Some(format!("caption for {}", object.key())),
            summary: None,
            tags: vec!["test".to_string()],
        })
    }
}

/// Store whose listing always fails.
#[derive(Debug, Default)]
pub struct UnlistableStore(pub MemoryStore);

#[async_trait::async_trait]
impl ObjectStore for UnlistableStore {
    fn backend(&self) -> &'static str {
        "unlistable"
    }

    async fn list(&self, _request: &ListRequest) -> StorageResult<ListPage> {
        Err(StorageError::new(StorageErrorKind::Unavailable(
            "bucket offline".to_string(),
        )))
    }

    async fn head(&self, key: &str) -> StorageResult<Option<MediaObject>> {
        self.0.head(key).await
    }

    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>> {
        self.0.get(key).await
    }

    async fn get_range(&self, key: &str, range: Range<u64>) -> StorageResult<Option<Vec<u8>>> {
        self.0.get_range(key, range).await
    }

    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StorageResult<()> {
        self.0.put(key, body, options).await
    }
}

/// Memory store holding `keys` with small dummy bodies.
pub async fn bucket(keys: &[&str]) -> MemoryStore {
    let store = MemoryStore::new();
    for key in keys {
        store.insert(*key, key.as_bytes().to_vec()).await;
    }
    store
}

/// Spawn a run bot over `store` and return its handle and metrics.
pub fn spawn_bot(
    store: Arc<dyn ObjectStore>,
    analyzer: Arc<EchoAnalyzer>,
) -> (RunHandle, TriggerMetrics) {
    let metrics = TriggerMetrics::new();
    let (bot, handle) = RunBot::channel(BatchOrchestrator::new(store, analyzer), metrics.clone());
    tokio::spawn(bot.run());
    (handle, metrics)
}
