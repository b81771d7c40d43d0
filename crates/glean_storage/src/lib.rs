//! Paginated object store backends for glean.
//!
//! This crate defines the [`ObjectStore`] contract the batch orchestrator
//! consumes (list/head/get/put over a flat key namespace) and ships backends
//! for a local directory, an in-process map and, behind the `s3` feature,
//! any S3-compatible bucket.
//!
//! # Example
//!
//! ```rust
//! use glean_storage::{ListRequest, MemoryStore, ObjectStore, PutOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! store.put("photos/a.jpg", vec![0u8; 16], &PutOptions::default()).await?;
//!
//! let page = store.list(&ListRequest::new("photos/")).await?;
//! assert_eq!(page.objects.len(), 1);
//! assert!(!page.truncated);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
#[cfg(feature = "s3")]
mod s3;
mod store;

pub use filesystem::FileSystemStore;
pub use glean_error::{StorageError, StorageErrorKind};
pub use memory::MemoryStore;
#[cfg(feature = "s3")]
pub use s3::S3Store;
pub use store::{
    DEFAULT_LIST_LIMIT, ListPage, ListRequest, MAX_LIST_LIMIT, ObjectStore, PutOptions,
    StorageResult, StoredObject,
};
