//! Configuration via `udfval.toml`
//!
//! A single TOML file holds the `[limits]` table handed to backends. Missing
//! fields fall back to defaults, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::limits::Limits;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "udfval.toml";

/// Value-layer configuration loaded from `udfval.toml`.
///
/// # Example
///
/// ```toml
/// [limits]
/// max_list_len = 1000000
/// max_bin_name_len = 15
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UdfConfig {
    /// Container and bin-name limits.
    #[serde(default)]
    pub limits: Limits,
}

impl UdfConfig {
    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: UdfConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.limits.max_bin_name_len == 0 {
            return Err(Error::Config(
                "limits.max_bin_name_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# udfval configuration

[limits]
# Maximum number of elements in a list
max_list_len = 1000000

# Maximum number of entries in a map
max_map_entries = 1000000

# Maximum number of bins in a record
max_bins = 32767

# Maximum bin name length in bytes
max_bin_name_len = 15
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => {
                Error::Config(format!("Failed to parse '{}': {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
            tracing::info!(target: "udfval::config", path = %path.display(), "Wrote default config");
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
