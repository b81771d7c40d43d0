//! Configuration for the HTTP analyzer.

use serde::{Deserialize, Serialize};

/// Connection and retry settings for [`crate::HttpAnalyzer`].
///
/// # Examples
///
/// ```
/// use glean_models::AnalyzerConfigBuilder;
///
/// let config = AnalyzerConfigBuilder::default()
///     .endpoint("http://localhost:9000/analyze")
///     .max_retries(5usize)
///     .build()
///     .unwrap();
/// assert_eq!(*config.timeout_secs(), 60);
/// assert_eq!(*config.max_retries(), 5);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct AnalyzerConfig {
    /// URL the analyze requests are posted to
    endpoint: String,
    /// Optional bearer token
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    api_key: Option<String>,
    /// Per-request timeout
    #[builder(default = "60")]
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    /// Retries after the first attempt for transient failures
    #[builder(default = "3")]
    #[serde(default = "default_max_retries")]
    max_retries: usize,
    /// Initial backoff between retries, doubled each attempt
    #[builder(default = "500")]
    #[serde(default = "default_retry_backoff_ms")]
    retry_backoff_ms: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}
