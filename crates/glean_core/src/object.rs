//! Stored object references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference to a blob in the object store.
///
/// Owned by the store; glean only reads these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct MediaObject {
    /// Unique key (path-like identifier) within the store
    key: String,
    /// Size in bytes
    size: u64,
    /// When the object was uploaded or last modified
    uploaded_at: DateTime<Utc>,
    /// MIME type, if the store tracks one
    content_type: Option<String>,
}

impl MediaObject {
    /// Create a new object reference without a content type.
    pub fn new(key: impl Into<String>, size: u64, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            size,
            uploaded_at,
            content_type: None,
        }
    }

    /// Attach a content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
