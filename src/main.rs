//! Teller Server CLI
//!
//! Serves the banking-terminal line protocol over TCP.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --listen 127.0.0.1:2525 --accounts users.json
//! cargo run -- --log-file teller.log
//! RUST_LOG=debug cargo run
//! ```
//!
//! The server loads the account storage file at startup (a missing or
//! corrupt file starts an empty store), binds the listen address, and
//! accepts connections until the process is terminated.
//!
//! # Exit Codes
//!
//! - 0: terminated externally
//! - 1: failure to bind the listen address, the only fatal startup error

use std::process;
use std::sync::Arc;
use teller::cli;
use teller::core::AccountStore;
use teller::logging;
use teller::server::Server;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // The subscriber lives for the whole process; components only emit
    // through the tracing facade.
    logging::init(args.log_file.as_deref());

    let store = Arc::new(AccountStore::open(&args.accounts_file).await);

    let server = match Server::bind(&args.listen, store).await {
        Ok(server) => server,
        Err(e) => {
            error!(addr = %args.listen, error = %e, "server startup failed");
            eprintln!("Error: failed to bind {}: {}", args.listen, e);
            process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!(error = %e, "server terminated");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
