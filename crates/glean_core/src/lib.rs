//! Core data types for glean.
//!
//! This crate provides the data model shared by every glean crate: stored
//! object references, the media kind classifier, the sidecar metadata record
//! and the per-run statistics.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod kind;
mod object;
mod record;
mod run;
mod sidecar;
mod telemetry;

pub use analysis::Analysis;
pub use kind::{MediaKind, classify};
pub use object::MediaObject;
pub use record::{MetadataRecord, normalize_tags};
pub use run::{RunOptions, RunReport, RunStats, RunStatus};
pub use sidecar::{SIDECAR_CONTENT_TYPE, SIDECAR_SUFFIX, is_sidecar, sidecar_key};
pub use telemetry::init_tracing;
