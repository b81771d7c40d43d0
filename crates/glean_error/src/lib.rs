//! Error types for glean.
//!
//! This crate provides the error types used throughout the glean workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use glean_error::{GleanResult, StorageError, StorageErrorKind};
//!
//! fn read_object() -> GleanResult<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::Unavailable("bucket offline".into())))?
//! }
//!
//! match read_object() {
//!     Ok(data) => println!("Got {} bytes", data.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod batch;
mod config;
mod error;
mod json;
mod server;
mod storage;

pub use analyzer::{AnalyzerError, AnalyzerErrorKind};
pub use batch::{BatchError, BatchErrorKind};
pub use config::ConfigError;
pub use error::{GleanError, GleanErrorKind, GleanResult};
pub use json::JsonError;
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
