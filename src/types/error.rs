//! Error types for the teller server
//!
//! This module defines all error kinds that can occur while serving the
//! protocol, together with their mapping to wire responses.
//!
//! # Error Categories
//!
//! - **Auth errors**: missing or failed authentication, answered `401`
//! - **Funds errors**: withdrawal exceeding the balance, answered `401`
//!   with a suffix
//! - **Format errors**: unparseable withdrawal amount, answered `400`
//! - **Protocol errors**: unknown verb or malformed line, answered `400`
//! - **Storage errors**: load/persist failures - logged, never shown to
//!   the client
//! - **I/O errors**: connection failures - terminate the affected session
//!   only

use crate::types::Response;
use thiserror::Error;

/// Main error type for the teller server
///
/// Client-facing variants carry enough context for log lines; variants
/// without a client-facing meaning are converted to `400 INVALID COMMAND`
/// at the session boundary rather than ever reaching the wire verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TellerError {
    /// A command that requires authentication arrived without it
    ///
    /// Also covers `PASS` with no account id on record.
    #[error("authentication required")]
    AuthRequired,

    /// Password verification failed for the presented account id
    #[error("authentication failed for account '{account}'")]
    AuthFailed {
        /// The account id the client tried to authenticate as
        account: String,
    },

    /// The store has no account under the given id
    ///
    /// Unreachable through the protocol in practice: balance and
    /// withdrawal are only issued for an id that already passed `PASS`.
    #[error("unknown account '{account}'")]
    AccountNotFound {
        /// The account id that was not found
        account: String,
    },

    /// Withdrawal amount exceeds the current balance
    ///
    /// The account state is unchanged when this is returned.
    #[error("insufficient balance for account '{account}': balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// The account id the withdrawal targeted
        account: String,
        /// Balance at the time of the check
        balance: u64,
        /// Requested withdrawal amount
        requested: u64,
    },

    /// Withdrawal amount token is not a non-negative integer
    #[error("invalid amount '{input}'")]
    InvalidAmount {
        /// The raw amount token as received
        input: String,
    },

    /// Unknown verb or malformed request line
    #[error("invalid command '{line}'")]
    InvalidCommand {
        /// The offending request line
        line: String,
    },

    /// Account storage could not be read or written
    ///
    /// Never surfaced to the client: a load failure degrades to an empty
    /// store, a persist failure is logged without rolling back the
    /// in-memory mutation.
    #[error("storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// I/O error on a connection or file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O failure
        message: String,
    },
}

impl From<std::io::Error> for TellerError {
    fn from(error: std::io::Error) -> Self {
        TellerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for TellerError {
    fn from(error: serde_json::Error) -> Self {
        TellerError::Storage {
            message: error.to_string(),
        }
    }
}

impl TellerError {
    /// Create an AuthFailed error
    pub fn auth_failed(account: &str) -> Self {
        TellerError::AuthFailed {
            account: account.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        TellerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(account: &str, balance: u64, requested: u64) -> Self {
        TellerError::InsufficientBalance {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        TellerError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create an InvalidCommand error
    pub fn invalid_command(line: &str) -> Self {
        TellerError::InvalidCommand {
            line: line.to_string(),
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        TellerError::Storage {
            message: message.into(),
        }
    }

    /// Map this error to its protocol response line
    ///
    /// Variants without a client-facing meaning (storage, unknown
    /// account, I/O) collapse to `400 INVALID COMMAND`; callers log those
    /// before responding so the detail is not lost.
    pub fn response(&self) -> Response {
        match self {
            TellerError::AuthRequired | TellerError::AuthFailed { .. } => Response::AuthError,
            TellerError::InsufficientBalance { .. } => Response::InsufficientBalance,
            TellerError::InvalidAmount { .. } => Response::InvalidAmountFormat,
            TellerError::InvalidCommand { .. } => Response::InvalidCommand,
            TellerError::AccountNotFound { .. }
            | TellerError::Storage { .. }
            | TellerError::Io { .. } => Response::InvalidCommand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::auth_required(TellerError::AuthRequired, "authentication required")]
    #[case::auth_failed(
        TellerError::auth_failed("alice"),
        "authentication failed for account 'alice'"
    )]
    #[case::not_found(TellerError::account_not_found("ghost"), "unknown account 'ghost'")]
    #[case::insufficient(
        TellerError::insufficient_balance("alice", 100, 150),
        "insufficient balance for account 'alice': balance 100, requested 150"
    )]
    #[case::invalid_amount(TellerError::invalid_amount("abc"), "invalid amount 'abc'")]
    #[case::invalid_command(TellerError::invalid_command("FOO bar"), "invalid command 'FOO bar'")]
    #[case::storage(TellerError::storage("disk full"), "storage error: disk full")]
    fn test_error_display(#[case] error: TellerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::auth_required(TellerError::AuthRequired, Response::AuthError)]
    #[case::auth_failed(TellerError::auth_failed("alice"), Response::AuthError)]
    #[case::insufficient(
        TellerError::insufficient_balance("alice", 100, 150),
        Response::InsufficientBalance
    )]
    #[case::invalid_amount(TellerError::invalid_amount("abc"), Response::InvalidAmountFormat)]
    #[case::invalid_command(TellerError::invalid_command("FOO"), Response::InvalidCommand)]
    #[case::not_found(TellerError::account_not_found("ghost"), Response::InvalidCommand)]
    #[case::storage(TellerError::storage("disk full"), Response::InvalidCommand)]
    fn test_response_mapping(#[case] error: TellerError, #[case] expected: Response) {
        assert_eq!(error.response(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: TellerError = io_error.into();
        assert!(matches!(error, TellerError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_converts_to_storage() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: TellerError = json_error.into();
        assert!(matches!(error, TellerError::Storage { .. }));
    }
}
