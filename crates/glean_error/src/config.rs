//! Configuration error types.

/// Invalid or unreadable configuration.
///
/// `setting` names the offending dotted key (`storage.page_size`) when the
/// failure is tied to one; source and parse failures leave it empty.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Dotted key of the rejected setting
    pub setting: Option<String>,
    /// What is wrong
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Error not tied to a single setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_error::ConfigError;
    ///
    /// let err = ConfigError::new("glean.toml: unexpected end of file");
    /// assert!(err.setting.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::located(None, message.into())
    }

    /// Error for one rejected setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_error::ConfigError;
    ///
    /// let err = ConfigError::for_setting("storage.page_size", "must be between 1 and 1000");
    /// assert_eq!(err.setting.as_deref(), Some("storage.page_size"));
    /// assert!(err.to_string().contains("storage.page_size: must be between"));
    /// ```
    #[track_caller]
    pub fn for_setting(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::located(Some(setting.into()), message.into())
    }

    #[track_caller]
    fn located(setting: Option<String>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            setting,
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration Error: ")?;
        if let Some(setting) = &self.setting {
            write!(f, "{}: ", setting)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}
