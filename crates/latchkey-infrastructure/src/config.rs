//! Configuration loading.
//!
//! Hosts can relocate the store file through an optional
//! `~/.config/latchkey/config.toml`:
//!
//! ```toml
//! [storage]
//! dir = "/tmp/latchkey-dev"
//! file_name = "store.json"
//! ```
//!
//! A missing file means defaults; an unreadable file is a configuration
//! error rather than a silent fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use latchkey_core::error::{LatchkeyError, Result};

use crate::paths::LatchkeyPaths;

/// Storage location overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the store file. Defaults to the platform data dir.
    pub dir: Option<PathBuf>,
    /// Store file name. Defaults to `store.json`.
    pub file_name: Option<String>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatchkeyConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl LatchkeyConfig {
    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = LatchkeyPaths::config_file().map_err(|e| LatchkeyError::config(e.to_string()))?;
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(config)`: File parsed, or absent (defaults)
    /// - `Err(_)`: File exists but could not be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolves the store file location, applying any overrides.
    pub fn store_file(&self) -> Result<PathBuf> {
        let dir = match &self.storage.dir {
            Some(dir) => dir.clone(),
            None => LatchkeyPaths::data_dir().map_err(|e| LatchkeyError::config(e.to_string()))?,
        };
        let file_name = self.storage.file_name.as_deref().unwrap_or("store.json");
        Ok(dir.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = LatchkeyConfig::load_from(&path).unwrap();
        assert_eq!(config, LatchkeyConfig::default());
    }

    #[test]
    fn test_loads_storage_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[storage]
dir = "/tmp/latchkey-test"
file_name = "accounts.json"
"#,
        )
        .unwrap();

        let config = LatchkeyConfig::load_from(&path).unwrap();
        assert_eq!(
            config.store_file().unwrap(),
            PathBuf::from("/tmp/latchkey-test/accounts.json")
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[storage\ndir = ").unwrap();

        let result = LatchkeyConfig::load_from(&path);
        assert!(result.unwrap_err().is_serialization());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = LatchkeyConfig::load_from(&path).unwrap();
        assert_eq!(config, LatchkeyConfig::default());
    }
}
