//! I/O module
//!
//! Handles the account storage file. Format concerns live in
//! `accounts_file`; the store decides *when* to read and write.

pub mod accounts_file;

pub use accounts_file::{load, save, AccountMap};
