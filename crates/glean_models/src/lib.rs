//! Content analyzers for glean.
//!
//! The batch orchestrator treats content analysis as an opaque, possibly
//! slow, possibly failing dependency behind [`ContentAnalyzer`]. This crate
//! defines that seam and ships [`HttpAnalyzer`], which forwards objects to an
//! inference endpoint. Which model runs behind the endpoint, and with what
//! prompt, is the endpoint's business.
//!
//! # Example
//!
//! ```rust,no_run
//! use glean_models::{AnalyzerConfigBuilder, HttpAnalyzer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalyzerConfigBuilder::default()
//!     .endpoint("http://localhost:9000/analyze")
//!     .build()?;
//! let analyzer = HttpAnalyzer::new(config)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod http;
mod wire;

pub use analyzer::ContentAnalyzer;
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder};
pub use glean_error::{AnalyzerError, AnalyzerErrorKind};
pub use http::HttpAnalyzer;
pub use wire::{AnalyzeRequest, AnalyzeResponse};
