//! glean - metadata sidecars for media in object storage
//!
//! glean walks an object store, classifies every key by extension, and for
//! each image or PDF without a `<key>.metadata.json` sidecar asks a content
//! analyzer for a caption or summary plus tags. The result is written back
//! next to the source object. Sidecar presence is the only record of prior
//! work, so runs are idempotent and a failed object is retried next time.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use glean::{GleanConfig, RunOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GleanConfig::load(None)?;
//! let report = config.orchestrator()?.run(&RunOptions::default()).await;
//! println!("{}", report.stats);
//! # Ok(())
//! # }
//! ```
//!
//! # Cargo Features
//!
//! - `s3` - S3-compatible object store backend
//!
//! # Architecture
//!
//! - `glean_error` - Error types
//! - `glean_core` - Data model, classifier, sidecar naming
//! - `glean_storage` - Object store trait and backends
//! - `glean_models` - Content analyzer trait and HTTP client
//! - `glean_batch` - Existence gate and batch orchestrator
//! - `glean_server` - Timer and HTTP triggers, configuration
//!
//! This crate (`glean`) re-exports everything for convenience.

pub use glean_core::*;
pub use glean_error::*;

pub use glean_batch::{BatchOrchestrator, ExistenceGate, ObjectOutcome};
pub use glean_models::{
    AnalyzeRequest, AnalyzeResponse, AnalyzerConfig, AnalyzerConfigBuilder, ContentAnalyzer,
    HttpAnalyzer,
};
#[cfg(feature = "s3")]
pub use glean_storage::S3Store;
pub use glean_storage::{
    DEFAULT_LIST_LIMIT, FileSystemStore, ListPage, ListRequest, MAX_LIST_LIMIT, MemoryStore,
    ObjectStore, PutOptions, StorageResult, StoredObject,
};
pub use glean_server::{
    ApiState, GleanConfig, GleanServer, MetricsSnapshot, RunBot, RunFailure, RunHandle,
    RunMessage, RunParams, ScheduleType, ServerSettings, StorageBackend, StorageConfig,
    TriggerMetrics, create_router, spawn_scheduler,
};
