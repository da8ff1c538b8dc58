//! Session lifecycle management.
//!
//! `SessionManager` wraps a [`CredentialStore`] with the sign-up, login,
//! logout, and restore operations and owns the authentication state the
//! rest of the application observes.

use std::sync::Arc;

use tokio::sync::watch;

use crate::account::Account;
use crate::credentials::{CredentialStore, find_account_by_email};
use crate::error::SignupError;
use crate::session::model::Session;

/// The authentication presentation state.
///
/// `Loading` exists only for the startup window while the persisted session
/// is being restored; it resolves exactly once to `Authenticated` or
/// `Unauthenticated` and is never re-entered. Afterwards the state moves
/// between `Unauthenticated` and `Authenticated` via login/sign-up and
/// logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Startup: the persisted session has not been restored yet.
    Loading,
    /// A user is signed in.
    Authenticated(Session),
    /// Nobody is signed in.
    Unauthenticated,
}

impl AuthState {
    /// True while the startup restore has not completed.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True when a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The signed-in identity, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Manages the single local session and its lifecycle.
///
/// `SessionManager` is responsible for:
/// - Restoring the persisted session once at startup
/// - Authenticating against the stored account collection
/// - Registering new accounts (sign-up immediately authenticates)
/// - Clearing the session on logout
/// - Publishing the current [`AuthState`] to observers
///
/// The state is held in a `tokio::sync::watch` channel: the manager is the
/// sole writer, and any number of observers (typically the UI binding)
/// subscribe read-only. All operations run as one short sequential chain of
/// awaited store calls per user action; there is no background task and no
/// retry.
pub struct SessionManager {
    /// Storage-backed account and session data access.
    credentials: Arc<dyn CredentialStore>,
    /// Current state; the channel doubles as the observable cell.
    state: watch::Sender<AuthState>,
}

impl SessionManager {
    /// Creates a manager in the `Loading` state.
    ///
    /// Call [`restore_session`] once during startup to leave `Loading`.
    ///
    /// [`restore_session`]: SessionManager::restore_session
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        Self { credentials, state }
    }

    /// Restores the persisted session at startup.
    ///
    /// Resolves to `Authenticated` when a stored session exists and to
    /// `Unauthenticated` otherwise, including when the underlying read
    /// fails (the credential store logs and swallows that). The state never
    /// remains `Loading` after this call.
    pub async fn restore_session(&self) {
        let next = match self.credentials.load_session().await {
            Some(session) => AuthState::Authenticated(session),
            None => AuthState::Unauthenticated,
        };
        self.state.send_replace(next);
    }

    /// Attempts to sign in with an email and plaintext password.
    ///
    /// Returns `true` only when an account with the exact email exists, its
    /// stored password equals `password`, and the session was persisted.
    /// Unknown email, wrong password, and storage failure all return
    /// `false` without distinction; the state is left untouched on failure.
    ///
    /// The comparison is plain string equality: no hashing, no timing-safe
    /// comparison. Preserved limitation of this local store.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let accounts = self.credentials.load_accounts().await;

        let Some(account) = find_account_by_email(&accounts, email) else {
            return false;
        };
        if account.password != password {
            return false;
        }

        let session = Session::from(account);
        if let Err(err) = self.credentials.save_session(&session).await {
            tracing::error!("login: failed to persist session: {err}");
            return false;
        }

        self.state.send_replace(AuthState::Authenticated(session));
        true
    }

    /// Registers a new account and immediately authenticates it.
    ///
    /// Fails with [`SignupError::UserAlreadyExists`] when an account with
    /// the same exact email string is already registered (no account
    /// created, no session change), and with [`SignupError::Failed`] when
    /// either persistence step fails.
    ///
    /// The account write and the session write are two separate storage
    /// operations, in that order. A failure between them leaves the account
    /// registered with no session persisted, a known partial-failure window
    /// (see DESIGN.md). On any failure the in-memory state is left
    /// untouched.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), SignupError> {
        let accounts = self.credentials.load_accounts().await;

        if find_account_by_email(&accounts, email).is_some() {
            return Err(SignupError::UserAlreadyExists);
        }

        let account = Account::new(name, email, password);
        let session = Session::from(&account);

        if let Err(err) = self.credentials.append_account(accounts, account).await {
            tracing::error!("sign-up: failed to persist account: {err}");
            return Err(SignupError::Failed);
        }
        if let Err(err) = self.credentials.save_session(&session).await {
            tracing::error!("sign-up: account persisted but session was not: {err}");
            return Err(SignupError::Failed);
        }

        self.state.send_replace(AuthState::Authenticated(session));
        Ok(())
    }

    /// Signs out.
    ///
    /// The in-memory state always becomes `Unauthenticated`, even when
    /// removing the persisted session fails; the UI must reflect the
    /// logged-out user. A failed removal is logged and can resurrect the
    /// old session on the next startup restore.
    pub async fn logout(&self) {
        if let Err(err) = self.credentials.clear_session().await {
            tracing::error!("logout: failed to remove stored session: {err}");
        }
        self.state.send_replace(AuthState::Unauthenticated);
    }

    /// The current authentication state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// The signed-in identity, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    /// True while the startup restore has not completed.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Subscribes to state changes.
    ///
    /// The receiver observes every transition; the current value is
    /// available immediately via `borrow`.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
