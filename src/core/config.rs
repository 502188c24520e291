//! Base directory marker file.
//!
//! Handles reading, writing, and validating the `.psec.toml` file that marks
//! a directory as an initialized secrets base directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Contents of `.psec.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Metadata about the base directory
    pub psec: Meta,
}

/// Metadata section of the marker file
#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    /// Version of psec that initialized the base directory
    pub version: String,
}

impl Config {
    /// Create a marker for the running psec version
    pub fn new() -> Self {
        Self {
            psec: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Path to the marker file inside `base_dir`
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(constants::BASEDIR_MARKER)
    }

    /// Check if a marker file exists in `base_dir`
    pub fn exists(base_dir: &Path) -> bool {
        Self::config_path(base_dir).is_file()
    }

    /// Load the marker from `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file can't be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::config_path(base_dir);
        debug!(path = %path.display(), "loading marker");

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        Ok(config)
    }

    /// Save the marker into `base_dir`.
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = Self::config_path(base_dir);
        debug!(path = %path.display(), "saving marker");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(&path, contents)?;
        crate::core::perms::set_mode(&path, constants::PRIVATE_FILE_MODE)?;

        Ok(())
    }

    /// Validate the marker contents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the version is empty.
    pub fn validate(&self) -> Result<()> {
        if self.psec.version.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
