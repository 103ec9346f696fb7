//! Tracing subscriber setup.

use super::error::Result;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const ENV_LOG: &str = "SENTIBOARD_LOG";
const DEFAULT_DIRECTIVES: &str = "warn";

/// Filter from `SENTIBOARD_LOG`, then `RUST_LOG`, then "warn"
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Log to stderr; used by the one-shot subcommands
pub fn init_stderr() {
    // try_init: a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to a file; the dashboard owns the terminal so stderr is off limits
pub fn init_file(path: &Path) -> Result<()> {
    let file = open_log_file(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
