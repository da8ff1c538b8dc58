//! Credential store contract.
//!
//! The credential store is the only component that touches the account
//! collection and the persisted session inside the key-value store. It owns
//! two keys: [`USERS_KEY`] for the ordered account sequence and
//! [`CURRENT_USER_KEY`] for the password-stripped session record.

use async_trait::async_trait;

use crate::account::Account;
use crate::error::Result;
use crate::session::Session;

/// Storage key holding the ordered account collection (JSON array).
pub const USERS_KEY: &str = "users";

/// Storage key holding the current session, absent when logged out.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Mediates all reads and writes of account and session data.
///
/// Read operations degrade instead of failing: a storage error or an
/// unreadable payload yields the empty collection or "no session", and is
/// logged inside the implementation. That conflation (a read failure looks
/// like an empty store) is part of the contract: implementations log at
/// the single point of use so the behavior can later be upgraded to
/// surfaced errors without touching callers. Write operations propagate
/// their failures; the session manager decides what to swallow.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the full account collection.
    ///
    /// Absent key, unreadable payload, and storage failure all yield an
    /// empty collection ("no accounts yet").
    async fn load_accounts(&self) -> Vec<Account>;

    /// Appends `account` to `accounts` and persists the whole collection.
    ///
    /// The entire sequence is rewritten under [`USERS_KEY`] on every
    /// registration; there is no partial update. The caller supplies the
    /// collection it just loaded, nothing re-reads or re-validates, so two
    /// overlapping sign-ups can lose an update (see DESIGN.md).
    async fn append_account(&self, accounts: Vec<Account>, account: Account) -> Result<()>;

    /// Loads the persisted session, if any.
    ///
    /// Absent key, unreadable payload, and storage failure all yield `None`.
    async fn load_session(&self) -> Option<Session>;

    /// Persists `session` under [`CURRENT_USER_KEY`].
    async fn save_session(&self, session: &Session) -> Result<()>;

    /// Removes the persisted session.
    async fn clear_session(&self) -> Result<()>;
}

/// Finds an account by exact email match.
///
/// No normalization: no trimming, no case-folding. `User@x.com` and
/// `user@x.com` are distinct accounts.
pub fn find_account_by_email<'a>(accounts: &'a [Account], email: &str) -> Option<&'a Account> {
    accounts.iter().find(|account| account.email == email)
}
