//! Account store
//!
//! This module provides the `AccountStore`, the single source of truth for
//! account state. It owns the id-to-account mapping, serializes concurrent
//! mutation, and persists the full snapshot after every change.
//!
//! # Concurrency
//!
//! All operations go through one `tokio::sync::Mutex` around the mapping.
//! Every mutation writes the *whole* snapshot to storage while the
//! mutation lock is held, so the persisted file can never be observed
//! mid-update and never lags a balance a client was already told about.
//! Sessions on other connections queue on the lock; no caller holds it
//! between commands.

use crate::io::accounts_file::{self, AccountMap};
use crate::types::TellerError;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Concurrency-safe holder of all accounts and their persistence
///
/// Sessions never see the mapping itself; they observe and mutate account
/// state only through these operations.
pub struct AccountStore {
    /// Path of the storage file rewritten on every mutation
    path: PathBuf,

    /// The account mapping, guarded by the store-wide mutation lock
    accounts: Mutex<AccountMap>,
}

impl AccountStore {
    /// Open a store backed by the given storage file
    ///
    /// Loads the persisted mapping at startup. A missing or unreadable
    /// file is not fatal: the store starts empty and the failure is
    /// logged as a warning, matching the storage contract.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the storage file
    ///
    /// # Returns
    ///
    /// A ready store holding every account the file contained, or none
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let accounts = match accounts_file::load(&path).await {
            Ok(accounts) => {
                info!(
                    path = %path.display(),
                    accounts = accounts.len(),
                    "account data loaded"
                );
                accounts
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "failed to load account storage, starting empty"
                );
                AccountMap::new()
            }
        };

        AccountStore {
            path,
            accounts: Mutex::new(accounts),
        }
    }

    /// Create a store over an in-memory mapping
    ///
    /// Used to seed state without a pre-existing storage file; the file
    /// is still written on the first mutation.
    pub fn with_accounts(path: impl Into<PathBuf>, accounts: AccountMap) -> Self {
        AccountStore {
            path: path.into(),
            accounts: Mutex::new(accounts),
        }
    }

    /// Check an id/password pair against the stored credentials
    ///
    /// # Returns
    ///
    /// `true` iff an account with `account` exists and its stored
    /// password equals `password`. No side effect.
    pub async fn verify(&self, account: &str, password: &str) -> bool {
        let accounts = self.accounts.lock().await;
        accounts
            .get(account)
            .is_some_and(|entry| entry.password == password)
    }

    /// Read the current balance of an account
    ///
    /// # Returns
    ///
    /// * `Ok(balance)` for a known account
    /// * `Err(TellerError::AccountNotFound)` otherwise - callers only ask
    ///   after authentication, so in practice this never fails for a
    ///   validly authenticated session
    pub async fn balance(&self, account: &str) -> Result<u64, TellerError> {
        let accounts = self.accounts.lock().await;
        accounts
            .get(account)
            .map(|entry| entry.balance)
            .ok_or_else(|| TellerError::account_not_found(account))
    }

    /// Withdraw an amount from an account
    ///
    /// The balance check and the decrement are one atomic unit under the
    /// store lock: two concurrent withdrawals against the same account
    /// can never both pass the check when their combined amount exceeds
    /// the balance. On success the full snapshot is persisted while the
    /// lock is still held; a persist failure is logged and the in-memory
    /// mutation stands.
    ///
    /// # Arguments
    ///
    /// * `account` - The account id to withdraw from
    /// * `amount` - The amount in whole currency units
    ///
    /// # Returns
    ///
    /// * `Ok(new_balance)` if the withdrawal was applied
    /// * `Err(TellerError::InsufficientBalance)` if `amount` exceeds the
    ///   balance - no mutation in that case
    /// * `Err(TellerError::AccountNotFound)` if the id is unknown
    pub async fn withdraw(&self, account: &str, amount: u64) -> Result<u64, TellerError> {
        let mut accounts = self.accounts.lock().await;

        let entry = accounts
            .get_mut(account)
            .ok_or_else(|| TellerError::account_not_found(account))?;

        if entry.balance < amount {
            return Err(TellerError::insufficient_balance(
                account,
                entry.balance,
                amount,
            ));
        }

        entry.balance -= amount;
        let new_balance = entry.balance;

        // Snapshot is written before the lock is released.
        if let Err(error) = accounts_file::save(&self.path, &accounts).await {
            error!(path = %self.path.display(), %error, "failed to persist account storage");
        }

        Ok(new_balance)
    }

    /// Persist the current snapshot to storage
    ///
    /// Mutating operations persist on their own; this is for explicit
    /// flushes such as writing an initial file at startup.
    pub async fn persist(&self) -> Result<(), TellerError> {
        let accounts = self.accounts.lock().await;
        accounts_file::save(&self.path, &accounts).await
    }

    /// Clone of the current mapping
    pub async fn snapshot(&self) -> AccountMap {
        self.accounts.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Account;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn seeded_store(file: &NamedTempFile) -> AccountStore {
        let mut accounts = AccountMap::new();
        accounts.insert("alice".to_string(), Account::new("secret", 100));
        accounts.insert("bob".to_string(), Account::new("hunter2", 50));
        AccountStore::with_accounts(file.path(), accounts)
    }

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::open(dir.path().join("users.json")).await;

        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_corrupt_file_starts_empty() {
        let mut file = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"{ not json").unwrap();

        let store = AccountStore::open(file.path()).await;
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_loads_persisted_accounts() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"alice": {"password": "secret", "balance": 100}}"#)
            .unwrap();

        let store = AccountStore::open(file.path()).await;

        assert!(store.verify("alice", "secret").await);
        assert_eq!(store.balance("alice").await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_verify_checks_id_and_password() {
        let file = NamedTempFile::new().unwrap();
        let store = seeded_store(&file);

        assert!(store.verify("alice", "secret").await);
        assert!(!store.verify("alice", "wrong").await);
        assert!(!store.verify("ghost", "secret").await);
    }

    #[tokio::test]
    async fn test_balance_unknown_account_fails() {
        let file = NamedTempFile::new().unwrap();
        let store = seeded_store(&file);

        let result = store.balance("ghost").await;
        assert!(matches!(result, Err(TellerError::AccountNotFound { .. })));
    }

    #[tokio::test]
    async fn test_withdraw_decrements_and_persists() {
        let file = NamedTempFile::new().unwrap();
        let store = seeded_store(&file);

        let new_balance = store.withdraw("alice", 40).await.unwrap();

        assert_eq!(new_balance, 60);
        assert_eq!(store.balance("alice").await.unwrap(), 60);

        // The snapshot on disk already reflects the mutation.
        let persisted = accounts_file::load(file.path()).await.unwrap();
        assert_eq!(persisted["alice"].balance, 60);
        assert_eq!(persisted["bob"].balance, 50);
    }

    #[tokio::test]
    async fn test_withdraw_exact_balance_reaches_zero() {
        let file = NamedTempFile::new().unwrap();
        let store = seeded_store(&file);

        let new_balance = store.withdraw("bob", 50).await.unwrap();

        assert_eq!(new_balance, 0);
        assert_eq!(store.balance("bob").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_withdraw_insufficient_balance_is_rejected_without_mutation() {
        let file = NamedTempFile::new().unwrap();
        let store = seeded_store(&file);

        let result = store.withdraw("alice", 150).await;

        assert_eq!(
            result,
            Err(TellerError::insufficient_balance("alice", 100, 150))
        );
        assert_eq!(store.balance("alice").await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_withdraw_unknown_account_fails() {
        let file = NamedTempFile::new().unwrap();
        let store = seeded_store(&file);

        let result = store.withdraw("ghost", 10).await;
        assert!(matches!(result, Err(TellerError::AccountNotFound { .. })));
    }

    #[tokio::test]
    async fn test_persist_then_open_round_trips() {
        let file = NamedTempFile::new().unwrap();
        let store = seeded_store(&file);

        store.persist().await.unwrap();
        let reloaded = AccountStore::open(file.path()).await;

        assert_eq!(reloaded.snapshot().await, store.snapshot().await);
    }

    // Concurrent access tests
    // Withdrawals racing on the same account must serialize on the store
    // lock: the check and the decrement are one unit, so oversubscribed
    // withdrawals can never jointly overdraw the account.
    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_withdrawals_never_overdraw() {
        let file = NamedTempFile::new().unwrap();
        let mut accounts = AccountMap::new();
        accounts.insert("alice".to_string(), Account::new("secret", 100));
        let store = Arc::new(AccountStore::with_accounts(file.path(), accounts));

        // Four withdrawals of 26 against a balance of 100: exactly three
        // can fit, whatever the interleaving.
        let mut handles = vec![];
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.withdraw("alice", 26).await },
            ));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 3);
        assert_eq!(store.balance("alice").await.unwrap(), 100 - 3 * 26);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_withdrawals_on_different_accounts_all_succeed() {
        let file = NamedTempFile::new().unwrap();
        let store = Arc::new(seeded_store(&file));

        let mut handles = vec![];
        for account in ["alice", "bob"] {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.withdraw(account, 10).await },
            ));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(store.balance("alice").await.unwrap(), 90);
        assert_eq!(store.balance("bob").await.unwrap(), 40);
    }
}
