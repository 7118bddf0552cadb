//! Per-connection line loop
//!
//! One invocation of [`handle`] serves one accepted TCP connection for
//! its whole lifetime: read a line, let the session process it, write
//! the single response line, repeat. The loop ends on a terminal `BYE`
//! response, on EOF, or on a transport error - and in every case the
//! connection is closed from the server side when the function returns.

use crate::core::{AccountStore, Session};
use crate::types::TellerError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

/// Serve one client connection until it terminates
///
/// Commands are strictly sequential within the connection: each line is
/// processed fully, including any store mutation and persistence, before
/// the next line is read.
///
/// # Arguments
///
/// * `stream` - The accepted TCP stream
/// * `peer` - The client's address, used for log context
/// * `store` - The shared account store
///
/// # Returns
///
/// * `Ok(())` when the client said `BYE` or disconnected
/// * `Err(TellerError::Io)` on a transport failure - contained to this
///   session by the caller
pub async fn handle(
    stream: TcpStream,
    peer: SocketAddr,
    store: Arc<AccountStore>,
) -> Result<(), TellerError> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut session = Session::new(store);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            // EOF: client went away without BYE
            return Ok(());
        }

        let request = line.trim_end_matches(['\r', '\n']);
        debug!(%peer, request, "received");

        let response = session.process_line(request).await;
        debug!(%peer, %response, "sent");

        writer.write_all(response.to_string().as_bytes()).await?;
        writer.write_all(b"\n").await?;

        if response.is_terminal() {
            return Ok(());
        }
    }
}
