//! Tracing/logging initialization
//!
//! Installs the process-wide subscriber that all components emit into
//! through the `tracing` facade. Events always go to stdout; when a log
//! file is configured they are appended there as well. Verbosity is
//! controlled with `RUST_LOG` (default `info`).

use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process
///
/// Owned by the entry point; components only depend on the `tracing`
/// macros. Safe to call multiple times (subsequent calls are no-ops).
///
/// # Arguments
///
/// * `log_file` - Optional file to append events to, in addition to
///   stdout. If the file cannot be opened, logging falls back to stdout
///   only and the failure is reported on stderr.
pub fn init(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = log_file.and_then(|path| {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(file),
            Err(error) => {
                eprintln!("failed to open log file '{}': {}", path.display(), error);
                None
            }
        }
    });

    match file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::io::stdout.and(Arc::new(file)))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }
    }
}
