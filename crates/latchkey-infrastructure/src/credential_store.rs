//! Key-value-backed credential store.
//!
//! `KvCredentialStore` implements [`CredentialStore`] over any
//! [`KeyValueStore`]. It is the only component that touches the `users`
//! and `currentUser` keys, and the single place where read failures are
//! logged and degraded to empty results.

use std::sync::Arc;

use async_trait::async_trait;

use latchkey_core::account::Account;
use latchkey_core::credentials::{CURRENT_USER_KEY, CredentialStore, USERS_KEY};
use latchkey_core::error::Result;
use latchkey_core::session::Session;
use latchkey_core::storage::KeyValueStore;

/// Credential store over a key-value backend.
///
/// Accounts are persisted as a JSON array under `users`, the session as a
/// JSON object under `currentUser`; both shapes are exactly the domain
/// models, unversioned. Reads parse defensively and fail closed: a storage
/// failure or an unreadable payload is logged here (`tracing::warn!`) and
/// surfaces as "no accounts" / "no session". A later implementation can
/// surface those errors by changing only this type; callers never match
/// on a storage-error variant.
pub struct KvCredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl KvCredentialStore {
    /// Creates a credential store over the given backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialStore for KvCredentialStore {
    async fn load_accounts(&self) -> Vec<Account> {
        let raw = match self.store.get(USERS_KEY).await {
            Ok(raw) => raw,
            Err(err) => {
                // Indistinguishable from "no accounts yet" for the caller.
                tracing::warn!("failed to read account collection: {err}");
                return Vec::new();
            }
        };

        let Some(raw) = raw else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(accounts) => accounts,
            Err(err) => {
                tracing::warn!("stored account collection is unreadable, treating as empty: {err}");
                Vec::new()
            }
        }
    }

    async fn append_account(&self, mut accounts: Vec<Account>, account: Account) -> Result<()> {
        accounts.push(account);
        let raw = serde_json::to_string(&accounts)?;
        self.store.set(USERS_KEY, &raw).await
    }

    async fn load_session(&self) -> Option<Session> {
        let raw = match self.store.get(CURRENT_USER_KEY).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("failed to read stored session: {err}");
                return None;
            }
        };

        match serde_json::from_str(&raw?) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!("stored session is unreadable, treating as absent: {err}");
                None
            }
        }
    }

    async fn save_session(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.store.set(CURRENT_USER_KEY, &raw).await
    }

    async fn clear_session(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY).await
    }
}
