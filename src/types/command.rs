//! Protocol command types for the teller server
//!
//! This module defines the commands a client may issue over the wire and
//! the parser that turns one request line into a command. A request line
//! is a sequence of whitespace-delimited tokens; the first token is the
//! case-sensitive verb and trailing tokens beyond those a verb consumes
//! are ignored.

use crate::types::TellerError;

/// Commands supported by the session protocol
///
/// Each variant represents one verb of the line protocol. `Wdra` carries
/// its amount as the raw token: the session checks authentication before
/// parsing the amount, so an unauthenticated withdrawal with a garbage
/// amount still answers `401 ERROR!` rather than a format error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Present an account id, entering the pending-password state
    Helo {
        /// The account id to authenticate as
        account: String,
    },

    /// Supply the password for the most recently presented account id
    Pass {
        /// The password to verify
        password: String,
    },

    /// Query the balance of the authenticated account
    Bala,

    /// Withdraw from the authenticated account
    Wdra {
        /// Raw amount token, parsed after the authentication check
        amount: String,
    },

    /// End the session; the server closes the connection after replying
    Bye,
}

impl Command {
    /// Parse one request line into a command
    ///
    /// Splits the line on whitespace and matches the first token against
    /// the verb set. An empty line, an unknown verb, or a missing required
    /// argument is a malformed line.
    ///
    /// # Arguments
    ///
    /// * `line` - One request line, without its trailing newline
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` if the line is a well-formed command
    /// * `Err(TellerError::InvalidCommand)` otherwise
    pub fn parse(line: &str) -> Result<Command, TellerError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens
            .next()
            .ok_or_else(|| TellerError::invalid_command(line))?;

        match verb {
            "HELO" => {
                let account = tokens
                    .next()
                    .ok_or_else(|| TellerError::invalid_command(line))?;
                Ok(Command::Helo {
                    account: account.to_string(),
                })
            }
            "PASS" => {
                let password = tokens
                    .next()
                    .ok_or_else(|| TellerError::invalid_command(line))?;
                Ok(Command::Pass {
                    password: password.to_string(),
                })
            }
            "BALA" => Ok(Command::Bala),
            "WDRA" => {
                let amount = tokens
                    .next()
                    .ok_or_else(|| TellerError::invalid_command(line))?;
                Ok(Command::Wdra {
                    amount: amount.to_string(),
                })
            }
            "BYE" => Ok(Command::Bye),
            _ => Err(TellerError::invalid_command(line)),
        }
    }
}
