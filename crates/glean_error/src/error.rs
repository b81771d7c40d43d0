//! Top-level error wrapper types.

use crate::{AnalyzerError, BatchError, ConfigError, JsonError, ServerError, StorageError};

/// Every error condition a glean crate can report.
///
/// # Examples
///
/// ```
/// use glean_error::{GleanError, ConfigError};
///
/// let err: GleanError = ConfigError::new("missing endpoint").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GleanErrorKind {
    /// Object store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Content analyzer error
    #[from(AnalyzerError)]
    Analyzer(AnalyzerError),
    /// Batch run error
    #[from(BatchError)]
    Batch(BatchError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Trigger server error
    #[from(ServerError)]
    Server(ServerError),
}

/// glean error with kind discrimination.
///
/// # Examples
///
/// ```
/// use glean_error::{GleanResult, ConfigError};
///
/// fn might_fail() -> GleanResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("glean Error: {}", _0)]
pub struct GleanError(Box<GleanErrorKind>);

impl GleanError {
    /// Create a new error from a kind.
    pub fn new(kind: GleanErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GleanErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GleanErrorKind
impl<T> From<T> for GleanError
where
    T: Into<GleanErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for glean operations.
pub type GleanResult<T> = std::result::Result<T, GleanError>;
