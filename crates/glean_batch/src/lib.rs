//! Batch orchestration for glean.
//!
//! [`BatchOrchestrator`] walks an object store page by page, decides per
//! object whether a sidecar must be generated, fans the work for one page out
//! as a wave of concurrent tasks and folds every task's outcome into
//! [`RunStats`](glean_core::RunStats). Per-object failures are counted and
//! logged; only a failed listing page ends a run early.
//!
//! # Example
//!
//! ```rust,no_run
//! use glean_batch::BatchOrchestrator;
//! use glean_core::RunOptions;
//! use glean_models::{AnalyzerConfigBuilder, HttpAnalyzer};
//! use glean_storage::FileSystemStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(FileSystemStore::new("/srv/media")?);
//! let analyzer = Arc::new(HttpAnalyzer::new(
//!     AnalyzerConfigBuilder::default()
//!         .endpoint("http://localhost:9000/analyze")
//!         .build()?,
//! )?);
//!
//! let orchestrator = BatchOrchestrator::new(store, analyzer).with_page_size(200);
//! let report = orchestrator.run(&RunOptions::default()).await;
//! println!("{}", report.stats);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gate;
mod orchestrator;
mod outcome;

pub use gate::ExistenceGate;
pub use glean_error::{BatchError, BatchErrorKind};
pub use orchestrator::BatchOrchestrator;
pub use outcome::ObjectOutcome;
