//! Trigger adapters for glean metadata runs.
//!
//! A single [`RunBot`] owns the orchestrator and executes runs one at a time.
//! Two triggers feed it:
//! - the timer, driven by a [`ScheduleType`] from configuration
//! - the HTTP surface (`POST /run`, `GET /health`, `GET /metrics`)
//!
//! [`GleanConfig`] loads the layered configuration and builds the
//! orchestrator the server runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod bot;
mod config;
mod factory;
mod metrics;
mod schedule;
mod server;

pub use api::{ApiState, RunFailure, RunParams, create_router};
pub use bot::{RUN_QUEUE_CAPACITY, RunBot, RunHandle, RunMessage};
pub use config::{GleanConfig, ServerSettings, StorageBackend, StorageConfig};
pub use metrics::{MetricsSnapshot, TriggerMetrics};
pub use schedule::ScheduleType;
pub use server::{GleanServer, spawn_scheduler};
