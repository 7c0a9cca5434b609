//! # Configuration
//!
//! `roster.toml` loading. Every section is optional; a missing file yields
//! the defaults.
//!
//! ```toml
//! [storage]
//! path = "roster.redb"
//!
//! [data]
//! latency_ms = 500
//! submit_latency_ms = 1000
//! fail_fetch = false
//!
//! [table]
//! page_size = 10
//!
//! [stores]
//! missing_record_policy = "lenient"  # or "strict"
//! ```

use roster_core::MissingRecordPolicy;
use roster_core::primitives::{DEFAULT_PAGE_SIZE, FETCH_LATENCY_MS, SUBMIT_LATENCY_MS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Default local storage file.
pub const DEFAULT_STORAGE_FILE: &str = "roster.redb";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub data: DataConfig,
    pub table: TableConfig,
    pub stores: StoresConfig,
}

/// Where local storage slots live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORAGE_FILE),
        }
    }
}

/// Behaviour of the mock data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Simulated fetch latency.
    pub latency_ms: u64,
    /// Simulated form submission latency.
    pub submit_latency_ms: u64,
    /// Make every fetch fail, to exercise error paths.
    pub fail_fetch: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            latency_ms: FETCH_LATENCY_MS,
            submit_latency_ms: SUBMIT_LATENCY_MS,
            fail_fetch: false,
        }
    }
}

impl DataConfig {
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    #[must_use]
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoresConfig {
    pub missing_record_policy: MissingRecordPolicy,
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse and validate TOML text; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "table.page_size must be at least 1".to_string(),
            });
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "storage.path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
