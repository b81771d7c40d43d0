//! HTTP adapter for a remote inference endpoint.

use crate::{AnalyzeRequest, AnalyzeResponse, AnalyzerConfig, ContentAnalyzer};
use base64::Engine;
use glean_core::{Analysis, MediaKind, MediaObject};
use glean_error::{AnalyzerError, AnalyzerErrorKind};
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Longest pause between two retries.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Analyzer that posts objects to an HTTP inference endpoint.
///
/// Transient failures (transport errors, 429, 5xx) are retried with
/// exponential backoff and jitter; other failures are returned at once.
#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    config: AnalyzerConfig,
    client: reqwest::Client,
}

impl HttpAnalyzer {
    /// Create a new HTTP analyzer.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is empty or the HTTP client cannot be built.
    #[instrument(skip(config), fields(endpoint = %config.endpoint()))]
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        if config.endpoint().trim().is_empty() {
            return Err(AnalyzerError::new(AnalyzerErrorKind::Configuration(
                "analyzer endpoint is empty".to_string(),
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| AnalyzerError::new(AnalyzerErrorKind::Configuration(e.to_string())))?;

        debug!("Created HTTP analyzer");
        Ok(Self { config, client })
    }

    /// Get the analyzer configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Send one request without retrying.
    async fn send_once(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, AnalyzerError> {
        let mut req = self.client.post(self.config.endpoint()).json(request);

        if let Some(api_key) = self.config.api_key() {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            AnalyzerError::new(AnalyzerErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(AnalyzerError::new(AnalyzerErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        response.json::<AnalyzeResponse>().await.map_err(|e| {
            AnalyzerError::new(AnalyzerErrorKind::Deserialization(e.to_string()))
        })
    }
}

#[async_trait::async_trait]
impl ContentAnalyzer for HttpAnalyzer {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, object, body), fields(key = %object.key(), size = body.len()))]
    async fn analyze(
        &self,
        object: &MediaObject,
        kind: MediaKind,
        body: &[u8],
    ) -> Result<Analysis, AnalyzerError> {
        if !kind.is_analyzable() {
            return Err(AnalyzerError::new(AnalyzerErrorKind::UnsupportedKind(
                kind.to_string(),
            )));
        }

        let request = AnalyzeRequest {
            key: object.key().clone(),
            kind,
            content_type: object.content_type().clone(),
            data: base64::engine::general_purpose::STANDARD.encode(body),
        };

        let retry_strategy = ExponentialBackoff::from_millis(*self.config.retry_backoff_ms())
            .factor(2)
            .max_delay(MAX_RETRY_DELAY)
            .map(jitter)
            .take(*self.config.max_retries());

        let response = Retry::spawn(retry_strategy, || async {
            match self.send_once(&request).await {
                Ok(response) => Ok(response),
                Err(e) if e.kind.is_retryable() => {
                    warn!(error = %e, "Analyzer request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent analyzer error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await?;

        let analysis = Analysis::from(response);
        if analysis.is_empty() {
            return Err(AnalyzerError::new(AnalyzerErrorKind::EmptyContent(
                object.key().clone(),
            )));
        }

        debug!(tags = analysis.tags.len(), "Analysis complete");
        Ok(analysis)
    }
}
