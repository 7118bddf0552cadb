//! Account storage file format
//!
//! Reads and writes the persisted account snapshot. The on-disk form is a
//! single JSON object with one key per account id:
//!
//! ```json
//! {
//!     "alice": {
//!         "password": "secret",
//!         "balance": 100
//!     }
//! }
//! ```
//!
//! The file is rewritten in full after every mutating command, so the
//! functions here always operate on the whole mapping. A `BTreeMap` keeps
//! the serialized output deterministic across rewrites.

use crate::types::{Account, AccountId, TellerError};
use std::collections::BTreeMap;
use std::path::Path;

/// The full account mapping as persisted to storage
pub type AccountMap = BTreeMap<AccountId, Account>;

/// Load the account mapping from a storage file
///
/// # Arguments
///
/// * `path` - Path to the storage file
///
/// # Returns
///
/// * `Ok(AccountMap)` with every persisted account
/// * `Err(TellerError::Io)` if the file cannot be read
/// * `Err(TellerError::Storage)` if the contents are not a valid snapshot
pub async fn load(path: &Path) -> Result<AccountMap, TellerError> {
    let contents = tokio::fs::read_to_string(path).await?;
    let accounts = serde_json::from_str(&contents)?;
    Ok(accounts)
}

/// Write the full account mapping to a storage file
///
/// Serializes the mapping as pretty-printed JSON and replaces the file
/// contents. Callers invoke this synchronously after every successful
/// mutation, never batched, so a crash after a success response cannot
/// lose that mutation.
///
/// # Arguments
///
/// * `path` - Path to the storage file
/// * `accounts` - The full mapping to persist
///
/// # Returns
///
/// * `Ok(())` once the file holds the new snapshot
/// * `Err(TellerError)` if serialization or the write fails
pub async fn save(path: &Path, accounts: &AccountMap) -> Result<(), TellerError> {
    let contents = serde_json::to_string_pretty(accounts)?;
    tokio::fs::write(path, contents).await?;
    Ok(())
}
