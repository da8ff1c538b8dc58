//! Key-value storage contract.
//!
//! The durable backing store is an external collaborator: a device-local,
//! asynchronous mapping from string keys to string values that survives
//! process restarts. Hosts embed whatever backend fits their platform;
//! `latchkey-infrastructure` ships a JSON-file store and an in-memory one.

use async_trait::async_trait;

use crate::error::Result;

/// An abstract, durable key-value store.
///
/// The core issues at most one write per key per user action, so
/// implementations need no cross-key ordering guarantee and no locking
/// discipline beyond keeping individual operations intact.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: Storage failure
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
