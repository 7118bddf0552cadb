//! Session protocol state machine
//!
//! This module provides the `Session` that drives one connection's
//! protocol state until termination. The session consumes one request
//! line at a time, produces exactly one response per line, and calls
//! into the [`AccountStore`] for balance and withdrawal operations.
//!
//! Command dispatch returns `Result<Response, TellerError>`; the error is
//! mapped to its response line at the session boundary, so no failure
//! while processing a single command can escape the session or kill its
//! connection task.

use crate::core::store::AccountStore;
use crate::types::{AccountId, Command, Response, TellerError};
use std::mem;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Authentication state of one session
///
/// A session is in exactly one of these states; `Bye` is handled by the
/// connection layer closing on the terminal response rather than by a
/// dedicated state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum AuthState {
    /// No account id on record
    #[default]
    Unauthenticated,

    /// An id was presented by `HELO` and awaits its password
    PendingPassword(AccountId),

    /// `PASS` verified the id; balance and withdrawal are permitted
    Authenticated(AccountId),
}

/// Per-connection protocol state machine
///
/// Created on connection accept and dropped when the connection closes;
/// it never outlives its connection and holds no store lock between
/// requests.
pub struct Session {
    store: Arc<AccountStore>,
    state: AuthState,
}

impl Session {
    /// Create a session over the shared account store
    pub fn new(store: Arc<AccountStore>) -> Self {
        Session {
            store,
            state: AuthState::default(),
        }
    }

    /// Process one request line and produce its response
    ///
    /// Parses the line, dispatches the command against the current
    /// state, and maps any error to its protocol response. Internal
    /// failures without a client-facing meaning are logged here and
    /// answered with `400 INVALID COMMAND`; the session stays usable for
    /// further lines.
    ///
    /// # Arguments
    ///
    /// * `line` - One request line, without its trailing newline
    ///
    /// # Returns
    ///
    /// The response to write back; `Response::is_terminal` tells the
    /// caller to close the connection afterwards.
    pub async fn process_line(&mut self, line: &str) -> Response {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(error) => {
                warn!(line, "rejected malformed request line");
                return error.response();
            }
        };

        match self.dispatch(command).await {
            Ok(response) => response,
            Err(error) => {
                if matches!(
                    error,
                    TellerError::AccountNotFound { .. }
                        | TellerError::Storage { .. }
                        | TellerError::Io { .. }
                ) {
                    error!(%error, line, "internal failure while processing command");
                }
                error.response()
            }
        }
    }

    /// Route a parsed command to its handler
    async fn dispatch(&mut self, command: Command) -> Result<Response, TellerError> {
        match command {
            Command::Helo { account } => self.handle_helo(account),
            Command::Pass { password } => self.handle_pass(&password).await,
            Command::Bala => self.handle_bala().await,
            Command::Wdra { amount } => self.handle_wdra(&amount).await,
            Command::Bye => self.handle_bye(),
        }
    }

    /// `HELO <id>`: record the id and wait for its password
    ///
    /// Valid in any state. Entering the pending state drops a previous
    /// authentication; the id is not trusted until `PASS` verifies it.
    fn handle_helo(&mut self, account: AccountId) -> Result<Response, TellerError> {
        info!(account = %account, "login attempt");
        self.state = AuthState::PendingPassword(account);
        Ok(Response::AuthRequire)
    }

    /// `PASS <password>`: verify against the most recently named id
    ///
    /// The pending id from `HELO` if one exists, else the currently
    /// authenticated id. Failure clears the session back to
    /// unauthenticated, whatever state it was in.
    async fn handle_pass(&mut self, password: &str) -> Result<Response, TellerError> {
        let account = match mem::take(&mut self.state) {
            AuthState::PendingPassword(account) | AuthState::Authenticated(account) => account,
            AuthState::Unauthenticated => {
                warn!("password presented with no account id on record");
                return Err(TellerError::AuthRequired);
            }
        };

        if self.store.verify(&account, password).await {
            info!(account = %account, "login successful");
            self.state = AuthState::Authenticated(account);
            Ok(Response::Accepted)
        } else {
            warn!(account = %account, "login failed");
            Err(TellerError::auth_failed(&account))
        }
    }

    /// `BALA`: read the authenticated account's balance
    async fn handle_bala(&mut self) -> Result<Response, TellerError> {
        let AuthState::Authenticated(account) = &self.state else {
            warn!("unauthenticated balance inquiry");
            return Err(TellerError::AuthRequired);
        };

        let balance = self.store.balance(account).await?;
        info!(account = %account, balance, "balance inquiry");
        Ok(Response::Amount(balance))
    }

    /// `WDRA <amount>`: withdraw from the authenticated account
    ///
    /// Authentication is checked before the amount is parsed, so an
    /// unauthenticated withdrawal answers `401` even with a garbage
    /// amount token.
    async fn handle_wdra(&mut self, raw_amount: &str) -> Result<Response, TellerError> {
        let AuthState::Authenticated(account) = &self.state else {
            warn!("unauthenticated withdrawal attempt");
            return Err(TellerError::AuthRequired);
        };

        let amount: u64 = raw_amount.parse().map_err(|_| {
            warn!(account = %account, input = raw_amount, "invalid withdrawal amount");
            TellerError::invalid_amount(raw_amount)
        })?;

        match self.store.withdraw(account, amount).await {
            Ok(balance) => {
                info!(account = %account, amount, balance, "withdrawal successful");
                Ok(Response::Accepted)
            }
            Err(err) => {
                if let TellerError::InsufficientBalance { balance, .. } = &err {
                    warn!(
                        account = %account,
                        amount,
                        balance,
                        "withdrawal rejected, insufficient balance"
                    );
                }
                Err(err)
            }
        }
    }

    /// `BYE`: acknowledge and signal the connection to close
    fn handle_bye(&mut self) -> Result<Response, TellerError> {
        match &self.state {
            AuthState::Authenticated(account) => info!(account = %account, "session ended"),
            _ => info!("session ended"),
        }
        Ok(Response::Bye)
    }
}
