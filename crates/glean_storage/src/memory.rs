//! In-memory object store.
//!
//! Objects live in a `BTreeMap` protected by an `RwLock`, so listing comes
//! out in key order for free. All data is lost when the store is dropped.
//! Useful for tests and for dry runs against a fixture set.

use crate::{ListPage, ListRequest, ObjectStore, PutOptions, StorageResult, StoredObject};
use chrono::{DateTime, Utc};
use glean_core::MediaObject;
use std::collections::BTreeMap;
use std::ops::{Bound, Range};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Blob {
    body: Vec<u8>,
    uploaded_at: DateTime<Utc>,
    content_type: Option<String>,
}

impl Blob {
    fn describe(&self, key: &str) -> MediaObject {
        let object = MediaObject::new(key, self.body.len() as u64, self.uploaded_at);
        match &self.content_type {
            Some(content_type) => object.with_content_type(content_type.clone()),
            None => object,
        }
    }
}

/// In-memory storage backend.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<RwLock<BTreeMap<String, Blob>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object with the current time as its upload time.
    pub async fn insert(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.insert_at(key, body, Utc::now()).await;
    }

    /// Insert an object with an explicit upload time.
    pub async fn insert_at(
        &self,
        key: impl Into<String>,
        body: impl Into<Vec<u8>>,
        uploaded_at: DateTime<Utc>,
    ) {
        let blob = Blob {
            body: body.into(),
            uploaded_at,
            content_type: None,
        };
        self.objects.write().await.insert(key.into(), blob);
    }

    /// Read an object body directly (for testing).
    pub async fn read(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).map(|b| b.body.clone())
    }

    /// Content type recorded for an object (for testing).
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .and_then(|b| b.content_type.clone())
    }

    /// Whether a key exists.
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    /// All keys in order.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    #[tracing::instrument(skip(self, request), fields(prefix = %request.prefix, cursor = ?request.cursor))]
    async fn list(&self, request: &ListRequest) -> StorageResult<ListPage> {
        let limit = request.effective_limit();
        let objects = self.objects.read().await;

        let lower = match &request.cursor {
            Some(cursor) => Bound::Excluded(cursor.clone()),
            None => Bound::Included(request.prefix.clone()),
        };

        let listed: Vec<MediaObject> = objects
            .range((lower, Bound::Unbounded))
            .skip_while(|(key, _)| key.as_str() < request.prefix.as_str())
            .take_while(|(key, _)| key.starts_with(&request.prefix))
            .take(limit + 1)
            .map(|(key, blob)| blob.describe(key))
            .collect();

        Ok(ListPage::from_lookahead(listed, limit))
    }

    async fn head(&self, key: &str) -> StorageResult<Option<MediaObject>> {
        Ok(self.objects.read().await.get(key).map(|b| b.describe(key)))
    }

    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>> {
        Ok(self.objects.read().await.get(key).map(|b| StoredObject {
            object: b.describe(key),
            body: b.body.clone(),
        }))
    }

    async fn get_range(&self, key: &str, range: Range<u64>) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.objects.read().await.get(key).map(|b| {
            let len = b.body.len();
            let start = usize::try_from(range.start).unwrap_or(len).min(len);
            let end = usize::try_from(range.end).unwrap_or(len).clamp(start, len);
            b.body[start..end].to_vec()
        }))
    }

    #[tracing::instrument(skip(self, body, options), fields(size = body.len()))]
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StorageResult<()> {
        let blob = Blob {
            body,
            uploaded_at: Utc::now(),
            content_type: options.content_type.clone(),
        };
        self.objects.write().await.insert(key.to_string(), blob);
        tracing::debug!("Stored object in memory");
        Ok(())
    }
}
