//! Object store trait definition.

use glean_core::MediaObject;
use glean_error::StorageError;
use std::ops::Range;

/// Result type for object store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Largest page a single list call may request.
pub const MAX_LIST_LIMIT: usize = 1000;

/// Page size used when the caller does not choose one.
pub const DEFAULT_LIST_LIMIT: usize = 500;

/// Parameters for one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Only keys starting with this prefix are returned
    pub prefix: String,
    /// Maximum number of objects in the page
    pub limit: usize,
    /// Cursor from the previous page, `None` for the first page
    pub cursor: Option<String>,
}

impl ListRequest {
    /// First page under `prefix` with the default page size.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            limit: DEFAULT_LIST_LIMIT,
            cursor: None,
        }
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Continue after a previous page.
    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Page size clamped to `1..=MAX_LIST_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIST_LIMIT)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Objects in lexicographic key order
    pub objects: Vec<MediaObject>,
    /// More pages remain after this one
    pub truncated: bool,
    /// Cursor to pass to the next request when `truncated`
    pub cursor: Option<String>,
}

impl ListPage {
    /// Build a page from a look-ahead listing.
    ///
    /// `objects` may hold up to `limit + 1` entries; the extra entry only
    /// signals that another page exists and is dropped.
    pub fn from_lookahead(mut objects: Vec<MediaObject>, limit: usize) -> Self {
        let truncated = objects.len() > limit;
        objects.truncate(limit);
        let cursor = if truncated {
            objects.last().map(|o| o.key().clone())
        } else {
            None
        };

        Self {
            objects,
            truncated,
            cursor,
        }
    }
}

/// An object body together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object metadata
    pub object: MediaObject,
    /// Raw object bytes
    pub body: Vec<u8>,
}

/// Options for [`ObjectStore::put`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// MIME type to record with the object, where the backend supports it
    pub content_type: Option<String>,
}

impl PutOptions {
    /// Options carrying a content type.
    pub fn with_content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
        }
    }
}

/// Flat key/value blob store with paginated listing.
///
/// Implementations are expected to be internally synchronized; callers issue
/// concurrent requests without holding locks.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name for logs (e.g. "filesystem", "memory", "s3").
    fn backend(&self) -> &'static str;

    /// List one page of objects in key order.
    async fn list(&self, request: &ListRequest) -> StorageResult<ListPage>;

    /// Fetch metadata without the body. `None` when the key does not exist.
    async fn head(&self, key: &str) -> StorageResult<Option<MediaObject>>;

    /// Fetch an object and its metadata. `None` when the key does not exist.
    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>>;

    /// Fetch a byte range of an object.
    ///
    /// The range is half-open; reads past the end of the object are
    /// truncated. `None` when the key does not exist.
    async fn get_range(&self, key: &str, range: Range<u64>) -> StorageResult<Option<Vec<u8>>>;

    /// Write an object, replacing any existing one.
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StorageResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn objects(n: usize) -> Vec<MediaObject> {
        (0..n)
            .map(|i| MediaObject::new(format!("k{i:02}"), 1, Utc::now()))
            .collect()
    }

    #[test]
    fn lookahead_marks_truncation() {
        let page = ListPage::from_lookahead(objects(4), 3);
        assert_eq!(page.objects.len(), 3);
        assert!(page.truncated);
        assert_eq!(page.cursor.as_deref(), Some("k02"));
    }

    #[test]
    fn exact_page_is_final() {
        let page = ListPage::from_lookahead(objects(3), 3);
        assert!(!page.truncated);
        assert!(page.cursor.is_none());
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(ListRequest::new("").with_limit(0).effective_limit(), 1);
        assert_eq!(ListRequest::new("").with_limit(5000).effective_limit(), MAX_LIST_LIMIT);
        assert_eq!(ListRequest::new("").effective_limit(), DEFAULT_LIST_LIMIT);
    }
}
