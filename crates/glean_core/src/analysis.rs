//! Content analyzer output.

use serde::{Deserialize, Serialize};

/// Descriptive content produced for one object.
///
/// Images usually carry a caption, documents a summary. Tags are passed
/// through [`crate::normalize_tags`] before they are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Short description of an image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Summary of a document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Descriptive tags as returned by the analyzer
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Analysis {
    /// Whether neither a caption nor a summary carries any text.
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| field.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.caption) && blank(&self.summary)
    }
}
