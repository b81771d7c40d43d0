//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (glean.toml shipped with the crate)
//! 2. `~/.config/glean/glean.toml`
//! 3. `./glean.toml`, or the file passed explicitly
//! 4. `GLEAN__SECTION__KEY` environment variables

use crate::ScheduleType;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use glean_error::ConfigError;
use glean_models::AnalyzerConfig;
use glean_storage::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../glean.toml");

/// Complete glean configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GleanConfig {
    /// Object store selection and listing settings
    pub storage: StorageConfig,
    /// Content analyzer endpoint
    pub analyzer: AnalyzerConfig,
    /// HTTP trigger settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Timer trigger schedule
    #[serde(default)]
    pub schedule: ScheduleType,
}

/// Which object store backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local directory tree
    Filesystem,
    /// In-process map, empty at startup
    Memory,
    /// S3-compatible bucket (requires the `s3` feature)
    S3,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind
    pub backend: StorageBackend,
    /// Root directory for the filesystem backend
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Bucket URL for the s3 backend, e.g. `s3://media`
    #[serde(default)]
    pub url: Option<String>,
    /// Listing prefix
    #[serde(default)]
    pub prefix: String,
    /// Objects per listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_LIST_LIMIT
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Listen address of the HTTP trigger
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

impl ServerSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns error if `bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|e| ConfigError::for_setting("server.bind", format!("'{}': {}", self.bind, e)))
    }
}

impl GleanConfig {
    /// Load configuration from every layer.
    ///
    /// When `explicit` is given it replaces `./glean.toml` and must exist.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or parsed, or if the merged
    /// configuration fails validation.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration: env > file > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/glean/glean.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("glean").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("GLEAN")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Bundled defaults overridden by a TOML document.
    ///
    /// Home, working-directory and environment layers are not consulted.
    ///
    /// # Errors
    ///
    /// Returns error if the document does not parse or fails validation.
    pub fn from_toml(overrides: &str) -> Result<Self, ConfigError> {
        Self::finish(Self::defaults().add_source(File::from_str(overrides, FileFormat::Toml)))
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let storage = &self.storage;

        if !(1..=MAX_LIST_LIMIT).contains(&storage.page_size) {
            return Err(ConfigError::for_setting(
                "storage.page_size",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_LIST_LIMIT, storage.page_size
                ),
            ));
        }

        match storage.backend {
            StorageBackend::Filesystem if storage.root.is_none() => {
                return Err(ConfigError::for_setting(
                    "storage.root",
                    "required for the filesystem backend",
                ));
            }
            StorageBackend::S3 if storage.url.as_deref().is_none_or(str::is_empty) => {
                return Err(ConfigError::for_setting(
                    "storage.url",
                    "required for the s3 backend",
                ));
            }
            _ => {}
        }

        if self.analyzer.endpoint().trim().is_empty() {
            return Err(ConfigError::for_setting("analyzer.endpoint", "must be set"));
        }

        self.server.bind_addr()?;

        self.schedule
            .validate()
            .map_err(|e| ConfigError::for_setting("schedule", e.kind.to_string()))?;

        Ok(())
    }
}
