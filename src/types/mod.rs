//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and identifier types
//! - `command`: Protocol commands and request-line parsing
//! - `response`: Protocol response lines
//! - `error`: Error types for the teller server

pub mod account;
pub mod command;
pub mod error;
pub mod response;

pub use account::{Account, AccountId};
pub use command::Command;
pub use error::TellerError;
pub use response::Response;
