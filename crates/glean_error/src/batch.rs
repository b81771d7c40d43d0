//! Batch run error types.
//!
//! Per-object failures carry the offending key so operators can find it in
//! the logs. `Listing` is the only kind that ends a run early.

/// Kinds of batch failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BatchErrorKind {
    /// Sidecar existence probe failed
    #[display("Existence probe failed for {}: {}", key, reason)]
    ExistenceProbe {
        /// Source object key
        key: String,
        /// Underlying storage failure
        reason: String,
    },
    /// Fetching the object body failed
    #[display("Failed to fetch {}: {}", key, reason)]
    Fetch {
        /// Source object key
        key: String,
        /// Underlying storage failure
        reason: String,
    },
    /// Object was listed but no longer exists
    #[display("Object vanished before it could be read: {}", _0)]
    ObjectVanished(String),
    /// Content analyzer failed
    #[display("Analysis failed for {}: {}", key, reason)]
    Analysis {
        /// Source object key
        key: String,
        /// Analyzer failure
        reason: String,
    },
    /// Metadata record could not be serialized
    #[display("Failed to serialize metadata for {}: {}", key, reason)]
    Serialize {
        /// Source object key
        key: String,
        /// Serializer failure
        reason: String,
    },
    /// Writing the sidecar failed
    #[display("Failed to write sidecar for {}: {}", key, reason)]
    Write {
        /// Source object key
        key: String,
        /// Underlying storage failure
        reason: String,
    },
    /// Listing a page failed; fatal to the run
    #[display("Listing failed: {}", _0)]
    Listing(String),
}

/// Batch error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Batch Error: {} at line {} in {}", kind, line, file)]
pub struct BatchError {
    /// The kind of error that occurred
    pub kind: BatchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BatchError {
    /// Create a new batch error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BatchErrorKind {
        &self.kind
    }

    /// Whether this failure aborts the whole run rather than one object.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, BatchErrorKind::Listing(_))
    }
}
