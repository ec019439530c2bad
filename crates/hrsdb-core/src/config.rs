//! Configuration for the health record store
//!
//! Every option has a default so a missing config file yields a working
//! local deployment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{HrsError, Result};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "/etc/hrsdb.toml";

/// Payload storage strategy for ECG sample data
///
/// A deployment picks one; there is no migration between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadBackend {
    /// One CSV file per ECG under the upload root
    Files,
    /// Encoded blob held in the ECG row
    Inline,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the SQLite database file
    pub database_path: PathBuf,

    /// Root directory for file-backed ECG payloads
    pub upload_root: PathBuf,

    /// Which payload storage strategy this deployment uses
    pub payload_backend: PayloadBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("hrsdb.db"),
            upload_root: PathBuf::from("uploads"),
            payload_backend: PayloadBackend::Files,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// * `Io` - If the file exists but cannot be read
    /// * `Validation` - If the file contents are not valid config TOML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file missing, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|err| HrsError::Io {
            op: "read_config".to_string(),
            message: err.to_string(),
        })?;
        toml::from_str(&text).map_err(|err| HrsError::Validation {
            reason: format!("invalid config '{}': {}", path.display(), err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("hrsdb.db"));
        assert_eq!(config.upload_root, PathBuf::from("uploads"));
        assert_eq!(config.payload_backend, PayloadBackend::Files);
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            database_path = "/var/lib/hrsdb/hrs.db"
            payload_backend = "inline"
            "#,
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/hrsdb/hrs.db"));
        assert_eq!(config.payload_backend, PayloadBackend::Inline);
        assert_eq!(config.upload_root, PathBuf::from("uploads"));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str(r#"payload_backend = "tape""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = Config::load("/nonexistent/hrsdb.toml").unwrap();
        assert_eq!(config, Config::default());
    }
}
