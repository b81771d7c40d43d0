//! JSON bodies exchanged with the inference endpoint.

use glean_core::{Analysis, MediaKind};
use serde::{Deserialize, Serialize};

/// Body posted to the endpoint for one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Source object key
    pub key: String,
    /// Classified media kind
    pub kind: MediaKind,
    /// MIME type, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Object bytes, base64 encoded
    pub data: String,
}

/// Body the endpoint answers with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Image caption
    #[serde(default)]
    pub caption: Option<String>,
    /// Document summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Descriptive tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<AnalyzeResponse> for Analysis {
    fn from(response: AnalyzeResponse) -> Self {
        Self {
            caption: response.caption,
            summary: response.summary,
            tags: response.tags,
        }
    }
}
