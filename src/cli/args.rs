use clap::Parser;
use std::path::PathBuf;

/// Serve the banking-terminal line protocol over TCP
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(about = "Line-oriented banking terminal server", long_about = None)]
pub struct CliArgs {
    /// Address to listen on
    #[arg(
        long = "listen",
        value_name = "ADDR",
        default_value = "127.0.0.1:2525",
        help = "Address to listen on, e.g. 127.0.0.1:2525"
    )]
    pub listen: String,

    /// Path to the account storage file
    #[arg(
        long = "accounts",
        value_name = "FILE",
        default_value = "users.json",
        help = "Account storage file, rewritten after every withdrawal"
    )]
    pub accounts_file: PathBuf,

    /// Optional append-only log file
    #[arg(
        long = "log-file",
        value_name = "FILE",
        help = "Also append log events to this file (stdout is always used)"
    )]
    pub log_file: Option<PathBuf>,
}
