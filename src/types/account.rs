//! Account-related types for the teller server
//!
//! This module defines the Account structure and related functionality
//! for managing persisted account state.

use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Account ids are the keys of the persisted storage object and are
/// presented by clients in the `HELO` command. They are opaque strings;
/// uniqueness is enforced by the store's mapping.
pub type AccountId = String;

/// Persisted account state
///
/// Represents one account as held by the store and as written to storage.
/// The struct is exactly the per-id value of the storage JSON object, so
/// serialization needs no intermediate record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Password checked by `PASS` during the two-step handshake
    pub password: String,

    /// Current balance in whole currency units
    ///
    /// Balances are non-negative by construction: `u64` cannot represent
    /// a negative value, and withdrawal rejects any amount exceeding the
    /// balance before mutating it.
    pub balance: u64,
}

impl Account {
    /// Create an account with the given password and starting balance
    pub fn new(password: impl Into<String>, balance: u64) -> Self {
        Account {
            password: password.into(),
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_password_and_balance() {
        let account = Account::new("hunter2", 100);
        assert_eq!(account.password, "hunter2");
        assert_eq!(account.balance, 100);
    }

    #[test]
    fn test_serializes_to_storage_shape() {
        let account = Account::new("pw", 42);
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json, serde_json::json!({"password": "pw", "balance": 42}));
    }

    #[test]
    fn test_deserializes_from_storage_shape() {
        let account: Account =
            serde_json::from_str(r#"{"password": "secret", "balance": 250}"#).unwrap();
        assert_eq!(account, Account::new("secret", 250));
    }

    #[test]
    fn test_rejects_negative_balance() {
        let result = serde_json::from_str::<Account>(r#"{"password": "pw", "balance": -1}"#);
        assert!(result.is_err());
    }
}
