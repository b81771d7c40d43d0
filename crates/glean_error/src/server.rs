//! Trigger server error types.

/// Specific trigger server error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Failed to bind the HTTP listener
    #[display("Failed to bind {}: {}", addr, reason)]
    Bind {
        /// Address that was requested
        addr: String,
        /// Reason reported by the OS
        reason: String,
    },
    /// HTTP server terminated with an error
    #[display("Server error: {}", _0)]
    Serve(String),
    /// The run bot is no longer accepting messages
    #[display("Run bot channel closed")]
    ChannelClosed,
    /// Schedule definition could not be used
    #[display("Invalid schedule: {}", _0)]
    Schedule(String),
}

/// Trigger server error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The kind of error that occurred
    pub kind: ServerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ServerError {
    /// Create a new server error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
