//! File-backed tracing setup.
//!
//! The TUI owns the terminal, so log output goes to a file in the data
//! directory instead of stderr. `RUST_LOG` overrides the default filter.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "anshts.log";

/// Initialises the global tracing subscriber writing to `<dir>/anshts.log`.
///
/// Returns the log file path. Safe to call only once per process.
pub fn init_logging(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}
