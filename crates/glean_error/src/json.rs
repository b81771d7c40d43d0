//! JSON encoding errors for reports and CLI output.

/// A value could not be rendered as JSON.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: cannot encode {}: {} at line {} in {}", subject, reason, line, file)]
pub struct JsonError {
    /// What was being encoded, e.g. "run report"
    pub subject: String,
    /// Serializer message
    pub reason: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Record a failed encoding of `subject`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_error::JsonError;
    ///
    /// let err = JsonError::new("run report", "key must be a string");
    /// assert_eq!(err.subject, "run report");
    /// assert!(err.to_string().contains("cannot encode run report"));
    /// ```
    #[track_caller]
    pub fn new(subject: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject: subject.into(),
            reason: reason.to_string(),
            line: location.line(),
            file: location.file(),
        }
    }
}
