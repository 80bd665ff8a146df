//! File-backed logging
//!
//! The game owns the terminal, so log records go to a file instead of
//! stderr. The filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

pub const DEFAULT_LOG_FILE: &str = "tui-blockfall.log";

/// `<temp dir>/tui-blockfall.log`
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_FILE)
}

/// Install the global logger, appending to `path` (or the default path).
/// Returns the file actually used.
pub fn init(path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialised")?;

    Ok(path)
}
