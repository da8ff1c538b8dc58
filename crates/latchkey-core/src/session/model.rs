//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::account::Account;

/// The locally-authenticated identity.
///
/// A session is a projection of an [`Account`] with the password stripped
/// before it ever reaches storage: the persisted record never contains a
/// password. At most one session exists at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Display name copied from the account.
    pub name: String,
    /// Email copied from the account.
    pub email: String,
}

impl From<&Account> for Session {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_strips_password() {
        let account = Account::new("John Doe", "john@example.com", "password123");
        let session = Session::from(&account);

        assert_eq!(session.name, "John Doe");
        assert_eq!(session.email, "john@example.com");

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "John Doe", "email": "john@example.com" })
        );
        assert!(json.get("password").is_none());
    }
}
