//! Durable JSON-file key-value store.
//!
//! Persists the whole key-value map as one pretty-printed JSON file.
//! Writes are atomic: serialize to a temporary file in the same directory,
//! fsync, then rename over the target, all under an advisory file lock.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use latchkey_core::error::{LatchkeyError, Result};
use latchkey_core::storage::KeyValueStore;

use crate::config::LatchkeyConfig;

/// A [`KeyValueStore`] backed by a single JSON map file.
///
/// The file holds a `{"key": "value"}` object; a missing or empty file
/// reads as an empty map. Each mutation takes the lock, reloads the map,
/// applies the change, and writes the whole map back atomically, so a
/// torn write can never corrupt the file. Overlapping read-modify-write
/// sequences *above* this layer can still lose an update; the credential
/// store documents that.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given file path.
    ///
    /// The file and its parent directory are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform default location,
    /// honoring `config.toml` overrides.
    pub fn default_location() -> Result<Self> {
        let config = LatchkeyConfig::load()?;
        Ok(Self::new(config.store_file()?))
    }

    /// Creates a store at the location the given configuration resolves to.
    pub fn from_config(config: &LatchkeyConfig) -> Result<Self> {
        Ok(Self::new(config.store_file()?))
    }

    /// Returns the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        // Write to a temporary file in the same directory, then rename.
        let tmp_path = Self::temp_path(path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    /// Locked read-modify-write of the whole map.
    ///
    /// `apply` returns whether anything changed; an unchanged map skips the
    /// write entirely.
    fn mutate<F>(path: &Path, apply: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _lock = FileLock::acquire(path)?;

        let mut entries = Self::read_entries(path)?;
        if apply(&mut entries) {
            Self::write_entries(path, &entries)?;
        }

        Ok(())
    }

    fn temp_path(path: &Path) -> Result<PathBuf> {
        let parent = path
            .parent()
            .ok_or_else(|| LatchkeyError::storage("store path has no parent directory"))?;
        let file_name = path
            .file_name()
            .ok_or_else(|| LatchkeyError::storage("store path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }

    async fn run_blocking<T, F>(task: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        tokio::task::spawn_blocking(task)
            .await
            .map_err(|e| LatchkeyError::storage(format!("storage task failed to join: {e}")))?
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path.clone();
        let key = key.to_string();
        Self::run_blocking(move || {
            let entries = Self::read_entries(&path)?;
            Ok(entries.get(&key).cloned())
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path.clone();
        let key = key.to_string();
        let value = value.to_string();
        Self::run_blocking(move || {
            Self::mutate(&path, |entries| {
                entries.insert(key, value);
                true
            })
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path.clone();
        let key = key.to_string();
        Self::run_blocking(move || {
            Self::mutate(&path, |entries| entries.remove(&key).is_some())
        })
        .await
    }
}

/// An advisory file lock released on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| LatchkeyError::storage(format!("failed to acquire lock: {e}")))?;
        }

        // Non-Unix platforms run without advisory locking; a single-user
        // local store issues one write at a time anyway.

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle drops; removing the lock file is
        // best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("store.json"))
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("users", "[]").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key_and_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        // No file yet.
        assert_eq!(store.get("users").await.unwrap(), None);

        store.set("other", "x").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("currentUser", "{}").await.unwrap();
        store.remove("currentUser").await.unwrap();
        assert_eq!(store.get("currentUser").await.unwrap(), None);

        // Removing an absent key is fine.
        store.remove("currentUser").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("users", "[1]").await.unwrap();
        store.set("users", "[1,2]").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), Some("[1,2]".to_string()));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        JsonFileStore::new(&path).set("users", "[]").await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("users").await.unwrap(), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set("users", "[]").await.unwrap();

        assert!(temp_dir.path().join("store.json").exists());
        assert!(!temp_dir.path().join(".store.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.get("users").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty_map() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("users").await.unwrap(), None);
    }
}
