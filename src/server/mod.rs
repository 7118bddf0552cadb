//! TCP server for the teller line protocol
//!
//! This module provides the network layer that accepts client
//! connections and manages their lifecycle.
//!
//! - **`listener`**: TCP listener spawning one task per connection
//! - **`connection`**: per-client request/response line loop

pub mod connection;
pub mod listener;

pub use listener::Server;
