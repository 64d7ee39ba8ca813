//! Log setup
//!
//! The TUI owns the terminal, so it only logs when given a file. Headless
//! mode logs to stderr, keeping stdout for the protocol.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the default level.
pub fn init(log_file: Option<&Path>, headless: bool) -> Result<()> {
    match (log_file, headless) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("failed to install logger: {e}"))
        }
        (None, true) => tracing_subscriber::fmt()
            .with_env_filter(filter("warn"))
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("failed to install logger: {e}")),
        (None, false) => Ok(()),
    }
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
