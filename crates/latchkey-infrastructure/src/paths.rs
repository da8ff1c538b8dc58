//! Unified path management for latchkey files.
//!
//! The configuration file and the default store location are resolved here
//! so every component agrees on where latchkey data lives.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform base directory could not be determined.
    BaseDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::BaseDirNotFound => write!(f, "Cannot find platform base directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for latchkey.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/latchkey/          # Config directory
/// └── config.toml              # Optional storage overrides
///
/// ~/.local/share/latchkey/     # Data directory
/// └── store.json               # Key-value store file
/// ```
///
/// (Platform equivalents on macOS and Windows, via the `dirs` crate.)
pub struct LatchkeyPaths;

impl LatchkeyPaths {
    /// Returns the latchkey configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("latchkey"))
            .ok_or(PathError::BaseDirNotFound)
    }

    /// Returns the latchkey data directory.
    ///
    /// This is where the durable store file lives by default.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("latchkey"))
            .ok_or(PathError::BaseDirNotFound)
    }

    /// Returns the path to the configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default path to the key-value store file.
    pub fn store_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("store.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = LatchkeyPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("latchkey"));
    }

    #[test]
    fn test_config_file() {
        let config_file = LatchkeyPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = LatchkeyPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_store_file() {
        let store_file = LatchkeyPaths::store_file().unwrap();
        assert!(store_file.ends_with("store.json"));
        let data_dir = LatchkeyPaths::data_dir().unwrap();
        assert!(store_file.starts_with(&data_dir));
    }
}
