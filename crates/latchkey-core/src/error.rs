//! Error types for the latchkey crates.

use thiserror::Error;

/// A shared error type for storage-facing operations.
///
/// This covers the plumbing below the credential store: key-value backends,
/// serialization of stored payloads, and configuration loading. Business
/// outcomes (duplicate sign-up, failed sign-up) are modelled separately as
/// [`SignupError`] because the presentation layer consumes them as ordinary
/// result values, not failures.
#[derive(Error, Debug)]
pub enum LatchkeyError {
    /// Key-value store access error (read/write/remove).
    #[error("storage error: {0}")]
    Storage(String),

    /// IO error (file system operations).
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LatchkeyError {
    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a Storage error.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a serialization error.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for LatchkeyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LatchkeyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LatchkeyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LatchkeyError>`.
pub type Result<T> = std::result::Result<T, LatchkeyError>;

/// Why a sign-up attempt did not produce an account.
///
/// Carried to the caller as a value; the stable identifier from [`kind`]
/// is what the presentation layer feeds into its message table.
///
/// [`kind`]: SignupError::kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    /// An account with the same exact email string already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Persisting the account or the session failed.
    #[error("sign-up could not be completed")]
    Failed,
}

impl SignupError {
    /// Stable identifier for message lookup.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserAlreadyExists => "user_already_exists",
            Self::Failed => "signup_failed",
        }
    }
}
