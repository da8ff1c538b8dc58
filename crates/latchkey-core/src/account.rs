//! Account domain model.

use serde::{Deserialize, Serialize};

/// A registered identity record.
///
/// Accounts are created by a successful sign-up and never updated or
/// deleted afterwards. The whole collection is persisted as one ordered
/// sequence under a single storage key, rewritten on every registration.
///
/// The password is held and compared as a plaintext string. That is the
/// documented contract of this local-demo store, not a recommendation;
/// nothing here is suitable for protecting real credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Display name as entered by the user.
    pub name: String,
    /// Unique across accounts; exact string comparison, no case-folding.
    pub email: String,
    /// Plaintext password, minimum length enforced by the validators.
    pub password: String,
}

impl Account {
    /// Creates a new account record from raw (already-trimmed) input.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let account = Account::new("Jane Doe", "jane@x.com", "secret1");
        assert_eq!(account.name, "Jane Doe");
        assert_eq!(account.email, "jane@x.com");
        assert_eq!(account.password, "secret1");
    }

    #[test]
    fn test_serialized_shape() {
        let account = Account::new("Jane Doe", "jane@x.com", "secret1");
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Jane Doe",
                "email": "jane@x.com",
                "password": "secret1"
            })
        );
    }
}
