//! Registry configuration.
//!
//! Loaded from JSON; every field has a default, so `{}` is a valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "patients";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// What the delete action does to a patient document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Keep the document and only refresh `updatedAt`.
    #[default]
    Touch,
    /// Remove the document from the collection.
    Remove,
}

/// Registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// SQLite file; in-memory store when absent
    pub database_path: Option<PathBuf>,
    /// Document collection holding the patients
    pub collection: String,
    pub delete_mode: DeleteMode,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            collection: DEFAULT_COLLECTION.to_string(),
            delete_mode: DeleteMode::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse and check a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded registry config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.collection.trim().is_empty() {
            return Err(ConfigError::Invalid("collection must not be empty".into()));
        }
        Ok(())
    }
}
