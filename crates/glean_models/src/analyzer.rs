//! Content analyzer trait definition.

use glean_core::{Analysis, MediaKind, MediaObject};
use glean_error::AnalyzerError;

/// Produces descriptive content for a stored object.
///
/// Implementations own their retry behavior; a returned error is final for
/// this run.
#[async_trait::async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Analyzer name for logs.
    fn name(&self) -> &str;

    /// Analyze one object.
    ///
    /// # Arguments
    ///
    /// * `object` - Metadata of the source object
    /// * `kind` - Classified media kind (image or pdf)
    /// * `body` - Raw object bytes
    ///
    /// # Errors
    ///
    /// Fails when the endpoint is unreachable, answers with malformed output
    /// or produces neither a caption nor a summary.
    async fn analyze(
        &self,
        object: &MediaObject,
        kind: MediaKind,
        body: &[u8],
    ) -> Result<Analysis, AnalyzerError>;
}
