//! HTTP trigger and metrics API.

use crate::{RunHandle, TriggerMetrics};
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use glean_core::{RunOptions, RunStats};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, instrument};

/// API state shared by all handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    runner: RunHandle,
    metrics: TriggerMetrics,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(runner: RunHandle, metrics: TriggerMetrics) -> Self {
        Self { runner, metrics }
    }
}

/// Creates the trigger API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/run", post(trigger_run))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Parameters accepted by `POST /run`, from the query string or a form body.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RunParams {
    /// Reprocess objects that already have a sidecar
    #[serde(default)]
    pub force_reprocess: bool,
}

/// Body returned when a triggered run did not complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFailure {
    /// Why the run failed
    pub error: String,
    /// Counters reached before the failure
    pub stats: RunStats,
}

/// Execute one run and report it.
///
/// 200 with the run report when the listing was exhausted, even if some
/// objects failed. 500 when the run aborted or the bot is unavailable.
#[instrument(skip_all)]
async fn trigger_run(
    State(state): State<ApiState>,
    Query(query): Query<RunParams>,
    form: Option<Form<RunParams>>,
) -> Response {
    let form = form.map(|Form(params)| params).unwrap_or_default();
    let options = RunOptions {
        force_reprocess: query.force_reprocess || form.force_reprocess,
    };
    info!(force = options.force_reprocess, "Run requested over HTTP");

    match state.runner.run(options).await {
        Ok(report) => match report.abort_reason() {
            None => (StatusCode::OK, Json(report)).into_response(),
            Some(reason) => {
                let failure = RunFailure {
                    error: reason.to_string(),
                    stats: report.stats,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response()
            }
        },
        Err(e) => {
            error!(error = %e, "Run bot unavailable");
            let failure = RunFailure {
                error: e.kind.to_string(),
                stats: RunStats::default(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response()
        }
    }
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();
    (StatusCode::OK, Json(snapshot))
}
