//! Tracing subscriber setup.
//!
//! The chat page owns the terminal, so it only logs when a file is given.
//! One-shot commands log to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log output goes.
pub enum LogTarget<'a> {
    /// Append to a file.
    File(&'a Path),
    /// Write to stderr.
    Stderr,
    /// Install nothing.
    Discard,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
pub fn init(target: LogTarget<'_>) -> std::io::Result<()> {
    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .init();
        }
        LogTarget::Discard => {}
    }
    Ok(())
}
