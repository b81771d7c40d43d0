//! Object store error types.

/// Kinds of object store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Object not found at the specified key
    #[display("Object not found: {}", _0)]
    NotFound(String),
    /// Failed to read an object body or its metadata
    #[display("Failed to read object: {}", _0)]
    Read(String),
    /// Failed to write an object
    #[display("Failed to write object: {}", _0)]
    Write(String),
    /// Failed to list a page of objects
    #[display("Failed to list objects: {}", _0)]
    List(String),
    /// Key cannot be mapped onto the backend
    #[display("Invalid object key: {}", _0)]
    InvalidKey(String),
    /// Permission denied when accessing storage
    #[display("Permission denied: {}", _0)]
    PermissionDenied(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
    /// Invalid storage configuration
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),
}

/// Object store error with location tracking.
///
/// # Examples
///
/// ```
/// use glean_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("photos/a.jpg".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the error reports a missing object.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, StorageErrorKind::NotFound(_))
    }
}
