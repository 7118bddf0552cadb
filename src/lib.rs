//! Teller Server Library
//! # Overview
//!
//! This library implements a minimal banking-terminal protocol server:
//! clients open a TCP connection, authenticate with a two-step
//! `HELO`/`PASS` handshake, then issue balance and withdrawal commands
//! over a fixed line-oriented text protocol.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Command, Response, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::store`] - The concurrency-safe account store and its persistence
//!   - [`core::session`] - The per-connection protocol state machine
//! - [`io`] - Account storage file handling
//! - [`server`] - TCP listener and per-connection line loop
//! - [`logging`] - Process-wide tracing subscriber setup
//!
//! # Protocol
//!
//! The wire protocol is newline-delimited ASCII, one command per line and
//! one response line per command:
//!
//! - **`HELO <id>`**: present an account id (`500 AUTH REQUIRE`)
//! - **`PASS <password>`**: authenticate the presented id (`525 OK!` / `401 ERROR!`)
//! - **`BALA`**: balance inquiry (`AMNT:<balance>`)
//! - **`WDRA <amount>`**: withdraw whole currency units (`525 OK!`)
//! - **`BYE`**: end the session; the server closes the connection
//!
//! # Concurrency
//!
//! One task per accepted connection, no cap on concurrent sessions.
//! All sessions share one [`core::AccountStore`], which serializes
//! mutation and persists the full account snapshot after every
//! withdrawal while still holding the mutation lock.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod server;
pub mod types;

pub use crate::core::{AccountStore, Session};
pub use crate::server::Server;
pub use crate::types::{Account, AccountId, Command, Response, TellerError};
