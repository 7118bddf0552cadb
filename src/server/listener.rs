//! TCP listener and accept loop
//!
//! Binds the listen address and spawns one task per accepted connection.
//! The accept loop never waits on a session: a connection that sends
//! nothing simply keeps its task and socket until it closes. There is no
//! cap on concurrent sessions.

use crate::core::AccountStore;
use crate::server::connection;
use crate::types::TellerError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// The teller TCP server
///
/// Owns the bound listener and the shared account store handed to every
/// session.
pub struct Server {
    listener: TcpListener,
    store: Arc<AccountStore>,
}

impl Server {
    /// Bind the listen address
    ///
    /// Failure to bind is the only fatal startup error of the process;
    /// it is returned to the caller rather than logged-and-ignored.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to listen on, e.g. `127.0.0.1:2525`
    /// * `store` - The shared account store
    pub async fn bind(addr: &str, store: Arc<AccountStore>) -> Result<Self, TellerError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Server { listener, store })
    }

    /// The address the listener actually bound
    ///
    /// Useful when binding port 0 to let the OS pick a free port.
    pub fn local_addr(&self) -> Result<SocketAddr, TellerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever
    ///
    /// Each accepted connection gets its own task running the connection
    /// line loop; accept errors are logged and the loop continues. A
    /// failing session never affects other sessions or the listener.
    pub async fn run(self) -> Result<(), TellerError> {
        info!(addr = %self.local_addr()?, "server listening");

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(error) => {
                    warn!(%error, "failed to accept connection");
                    continue;
                }
            };

            info!(%peer, "client connected");
            let store = Arc::clone(&self.store);
            tokio::spawn(async move {
                match connection::handle(stream, peer, store).await {
                    Ok(()) => info!(%peer, "client connection closed"),
                    Err(error) => error!(%peer, %error, "client handling error"),
                }
            });
        }
    }
}
