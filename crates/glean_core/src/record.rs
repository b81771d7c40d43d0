//! Sidecar metadata records.

use crate::{Analysis, MediaKind, MediaObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata written next to a source object.
///
/// Its presence at [`crate::sidecar_key`] of `filename` marks the object as
/// processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Source object key
    pub filename: String,
    /// Media kind of the source object
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Image caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Document summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Lower-cased, de-duplicated tags in first-seen order
    pub tags: Vec<String>,
    /// Source object size in bytes
    pub size: u64,
    /// Source object upload time
    pub last_modified: DateTime<Utc>,
    /// When this record was generated
    pub generated_at: DateTime<Utc>,
}

impl MetadataRecord {
    /// Build a record from an analyzer result.
    pub fn from_analysis(
        object: &MediaObject,
        kind: MediaKind,
        analysis: Analysis,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let trimmed = |field: Option<String>| {
            field
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            filename: object.key().clone(),
            kind,
            caption: trimmed(analysis.caption),
            summary: trimmed(analysis.summary),
            tags: normalize_tags(analysis.tags),
            size: *object.size(),
            last_modified: *object.uploaded_at(),
            generated_at,
        }
    }

    /// Render as pretty-printed UTF-8 JSON, the sidecar wire format.
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}

/// Lower-case, trim and de-duplicate tags, keeping first-seen order.
///
/// # Examples
///
/// ```
/// use glean_core::normalize_tags;
///
/// let tags = normalize_tags(vec!["Beach".into(), " sunset ".into(), "beach".into(), "".into()]);
/// assert_eq!(tags, vec!["beach", "sunset"]);
/// ```
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
