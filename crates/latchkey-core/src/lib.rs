//! Core domain for local account registration and session management.
//!
//! This crate holds the storage-agnostic half of latchkey: the account and
//! session models, the [`KeyValueStore`] and [`CredentialStore`] contracts,
//! the [`SessionManager`] state machine, and the pure field validators.
//! Storage backends live in `latchkey-infrastructure`.

pub mod account;
pub mod credentials;
pub mod error;
pub mod session;
pub mod storage;
pub mod validation;

pub use account::Account;
pub use error::{LatchkeyError, Result, SignupError};
pub use session::{AuthState, Session, SessionManager};
pub use storage::KeyValueStore;
