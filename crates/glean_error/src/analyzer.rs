//! Content analyzer error types.

/// Specific analyzer error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AnalyzerErrorKind {
    /// Transport failure talking to the inference endpoint
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Endpoint answered with a non-success status
    #[display("API error ({}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to decode analyzer response: {}", _0)]
    Deserialization(String),
    /// Endpoint returned neither a caption nor a summary
    #[display("Analyzer returned empty content for {}", _0)]
    EmptyContent(String),
    /// The analyzer cannot handle this media kind
    #[display("Unsupported media kind: {}", _0)]
    UnsupportedKind(String),
    /// Analyzer misconfigured
    #[display("Configuration error: {}", _0)]
    Configuration(String),
}

impl AnalyzerErrorKind {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport failures, rate limiting (429) and server-side errors (5xx)
    /// are transient. Everything else fails the object immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnalyzerErrorKind::Http(_) => true,
            AnalyzerErrorKind::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Analyzer error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Analyzer Error: {} at line {} in {}", kind, line, file)]
pub struct AnalyzerError {
    /// The kind of error that occurred
    pub kind: AnalyzerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AnalyzerError {
    /// Create a new analyzer error with caller location tracking.
    #[track_caller]
    pub fn new(kind: AnalyzerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        assert!(AnalyzerErrorKind::Http("reset".into()).is_retryable());
        assert!(
            AnalyzerErrorKind::Api {
                status: 503,
                message: "overloaded".into()
            }
            .is_retryable()
        );
        assert!(
            AnalyzerErrorKind::Api {
                status: 429,
                message: "slow down".into()
            }
            .is_retryable()
        );
        assert!(
            !AnalyzerErrorKind::Api {
                status: 400,
                message: "bad request".into()
            }
            .is_retryable()
        );
        assert!(!AnalyzerErrorKind::EmptyContent("a.jpg".into()).is_retryable());
    }
}
