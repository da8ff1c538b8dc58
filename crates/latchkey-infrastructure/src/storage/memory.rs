//! In-memory key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use latchkey_core::error::Result;
use latchkey_core::storage::KeyValueStore;

/// A [`KeyValueStore`] held entirely in process memory.
///
/// Nothing survives a restart. Intended for tests and for embedding hosts
/// that bridge their own platform storage and only need latchkey's logic.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.set("users", "[]").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), Some("[]".to_string()));
        assert_eq!(store.len().await, 1);

        store.remove("users").await.unwrap();
        assert_eq!(store.get("users").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("currentUser").await.unwrap(), None);
    }
}
