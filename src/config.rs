//! Catalog configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};

/// Default number of transitions kept in the catalog history
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Tunables for a [`crate::Catalog`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Maximum number of history entries to keep; 0 disables history
    pub history_capacity: usize,
    /// Register the tracing notifier on construction
    pub notify: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { history_capacity: DEFAULT_HISTORY_CAPACITY, notify: true }
    }
}

/// Errors from loading a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    /// The config contents are not valid JSON for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogConfig {
    /// Parse a config from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the JSON is malformed or has fields
    /// of the wrong type
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are invalid
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Set the history capacity
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Enable or disable the built-in tracing notifier
    #[must_use]
    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }
}
