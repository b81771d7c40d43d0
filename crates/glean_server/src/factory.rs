//! Build stores and orchestrators from configuration.

use crate::{GleanConfig, StorageBackend, StorageConfig};
use glean_batch::BatchOrchestrator;
use glean_error::GleanResult;
use glean_models::HttpAnalyzer;
use glean_storage::{FileSystemStore, MemoryStore, ObjectStore};
use std::sync::Arc;
use tracing::instrument;

impl StorageConfig {
    /// Open the configured backend.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be opened, or if `s3` is selected
    /// in a build without the `s3` feature.
    #[instrument(skip(self), fields(backend = ?self.backend))]
    pub fn open(&self) -> GleanResult<Arc<dyn ObjectStore>> {
        match self.backend {
            StorageBackend::Filesystem => {
                let root = self.root.clone().ok_or_else(|| {
                    glean_error::ConfigError::for_setting(
                        "storage.root",
                        "required for the filesystem backend",
                    )
                })?;
                Ok(Arc::new(FileSystemStore::new(root)?))
            }
            StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StorageBackend::S3 => open_s3(self),
        }
    }
}

#[cfg(feature = "s3")]
fn open_s3(config: &StorageConfig) -> GleanResult<Arc<dyn ObjectStore>> {
    let url = config.url.as_deref().unwrap_or_default();
    Ok(Arc::new(glean_storage::S3Store::new(url)?))
}

#[cfg(not(feature = "s3"))]
fn open_s3(_config: &StorageConfig) -> GleanResult<Arc<dyn ObjectStore>> {
    Err(glean_error::ConfigError::for_setting(
        "storage.backend",
        "s3 requires glean to be built with the `s3` feature",
    )
    .into())
}

impl GleanConfig {
    /// Orchestrator over the configured store and analyzer.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be opened or the analyzer
    /// configuration is rejected.
    pub fn orchestrator(&self) -> GleanResult<BatchOrchestrator> {
        let store = self.storage.open()?;
        let analyzer = HttpAnalyzer::new(self.analyzer.clone())?;

        Ok(BatchOrchestrator::new(store, Arc::new(analyzer))
            .with_prefix(self.storage.prefix.clone())
            .with_page_size(self.storage.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_orchestrator_from_config() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let doc = format!(
            r#"
            [storage]
            backend = "filesystem"
            root = "{}"
            prefix = "photos/"
            page_size = 25

            [analyzer]
            endpoint = "http://localhost:9000/analyze"
            "#,
            dir.path().join("bucket").display()
        );
        let config = GleanConfig::from_toml(&doc)?;

        let orchestrator = config.orchestrator()?;
        assert_eq!(orchestrator.prefix(), "photos/");
        assert_eq!(orchestrator.page_size(), 25);
        assert!(dir.path().join("bucket").is_dir());
        Ok(())
    }

    #[test]
    fn test_memory_backend_opens_empty() -> Result<(), Box<dyn std::error::Error>> {
        let config = GleanConfig::from_toml(
            r#"
            [storage]
            backend = "memory"

            [analyzer]
            endpoint = "http://localhost:9000/analyze"
            "#,
        )?;
        assert_eq!(config.storage.open()?.backend(), "memory");
        Ok(())
    }

    #[cfg(not(feature = "s3"))]
    #[test]
    fn test_s3_without_feature_is_rejected() {
        let config = GleanConfig::from_toml(
            r#"
            [storage]
            backend = "s3"
            url = "s3://media"

            [analyzer]
            endpoint = "http://localhost:9000/analyze"
            "#,
        )
        .unwrap();
        let err = config.storage.open().err().unwrap();
        assert!(err.to_string().contains("s3"));
    }
}
