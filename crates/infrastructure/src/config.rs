//! YAML configuration loading.

use std::path::{Path, PathBuf};

use reposcout_domain::{DomainError, HarnessConfig};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for a `HarnessConfig`.
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file parsed but holds unusable values.
    #[error("invalid config: {0}")]
    Invalid(#[from] DomainError),
}

/// Parses and validates a configuration from YAML text.
///
/// Keys left out of the document keep their defaults. An empty document
/// yields the default configuration.
///
/// # Errors
///
/// Returns `ConfigError::Yaml` for malformed input and
/// `ConfigError::Invalid` when validation fails.
pub fn from_yaml_str(yaml: &str) -> Result<HarnessConfig, ConfigError> {
    let config = if yaml.trim().is_empty() {
        HarnessConfig::default()
    } else {
        serde_yaml::from_str::<HarnessConfig>(yaml)?
    };
    config.validate()?;
    Ok(config)
}

/// Reads a configuration file from disk.
///
/// # Errors
///
/// Returns `ConfigError::Io` when the file cannot be read, otherwise
/// whatever [`from_yaml_str`] returns.
pub async fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "loaded config file");
    from_yaml_str(&contents)
}
