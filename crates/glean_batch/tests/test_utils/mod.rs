//! Test doubles for orchestrator tests.
//!
//! `ScriptedAnalyzer` answers from a script and `FaultyStore` wraps a
//! `MemoryStore` with injectable failures. Both append to a shared `EventLog`
//! so tests can assert on the interleaving of listing and analysis.

#![allow(dead_code)]

use glean_core::{Analysis, MediaKind, MediaObject};
use glean_error::{AnalyzerError, AnalyzerErrorKind, StorageError, StorageErrorKind};
use glean_models::ContentAnalyzer;
use glean_storage::{
    ListPage, ListRequest, MemoryStore, ObjectStore, PutOptions, StorageResult, StoredObject,
};
use std::collections::HashSet;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Ordered record of store and analyzer calls.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }

    pub fn positions(&self, event: &str) -> Vec<usize> {
        self.events()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.as_str() == event)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Analyzer that captions every object after its key and fails on request.
#[derive(Debug, Default)]
pub struct ScriptedAnalyzer {
    failing: HashSet<String>,
    /// Keys answered with whitespace-only text and no tags
    blank: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    log: EventLog,
}

impl ScriptedAnalyzer {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn failing_for(mut self, keys: &[&str]) -> Self {
        self.failing = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn blank_for(mut self, keys: &[&str]) -> Self {
        self.blank = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContentAnalyzer for ScriptedAnalyzer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn analyze(
        &self,
        object: &MediaObject,
        kind: MediaKind,
        _body: &[u8],
    ) -> Result<Analysis, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("analyze:start:{}", object.key()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.log.push(format!("analyze:end:{}", object.key()));

        if self.failing.contains(object.key()) {
            return Err(AnalyzerError::new(AnalyzerErrorKind::Api {
                status: 503,
                message: "model overloaded".to_string(),
            }));
        }

        if self.blank.contains(object.key()) {
            return Ok(Analysis {
                caption: Some("   ".to_string()),
                summary: Some(String::new()),
                tags: Vec::new(),
            });
        }

        let text = format!("{} of {}", kind, object.key());
        Ok(match kind {
            MediaKind::Pdf => Analysis {
                caption: None,
                summary: Some(text),
                tags: vec!["Document".into(), "document".into()],
            },
            _ => Analysis {
                caption: Some(text),
                summary: None,
                tags: vec!["Photo".into(), "glean".into()],
            },
        })
    }
}

/// Memory store with injectable failures.
#[derive(Debug, Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    /// 1-based list call that fails
    fail_list_call: Option<usize>,
    fail_head_for: HashSet<String>,
    fail_put_for: HashSet<String>,
    list_calls: AtomicUsize,
    head_calls: AtomicUsize,
    log: EventLog,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore, log: EventLog) -> Self {
        Self {
            inner,
            log,
            ..Default::default()
        }
    }

    pub fn failing_list_call(mut self, call: usize) -> Self {
        self.fail_list_call = Some(call);
        self
    }

    pub fn failing_head_for(mut self, keys: &[&str]) -> Self {
        self.fail_head_for = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn failing_put_for(mut self, keys: &[&str]) -> Self {
        self.fail_put_for = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn head_calls(&self) -> usize {
        self.head_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FaultyStore {
    fn backend(&self) -> &'static str {
        "faulty"
    }

    async fn list(&self, request: &ListRequest) -> StorageResult<ListPage> {
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.push("list");
        if self.fail_list_call == Some(call) {
            return Err(StorageError::new(StorageErrorKind::Unavailable(
                "bucket unreachable".to_string(),
            )));
        }
        self.inner.list(request).await
    }

    async fn head(&self, key: &str) -> StorageResult<Option<MediaObject>> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_head_for.contains(key) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied(
                key.to_string(),
            )));
        }
        self.inner.head(key).await
    }

    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>> {
        self.inner.get(key).await
    }

    async fn get_range(&self, key: &str, range: Range<u64>) -> StorageResult<Option<Vec<u8>>> {
        self.inner.get_range(key, range).await
    }

    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StorageResult<()> {
        if self.fail_put_for.contains(key) {
            return Err(StorageError::new(StorageErrorKind::Write(key.to_string())));
        }
        self.inner.put(key, body, options).await
    }
}

/// Build a memory store holding `keys` with small dummy bodies.
pub async fn bucket(keys: &[&str]) -> MemoryStore {
    let store = MemoryStore::new();
    for key in keys {
        store.insert(*key, key.as_bytes().to_vec()).await;
    }
    store
}
