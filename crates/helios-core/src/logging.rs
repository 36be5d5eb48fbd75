//! File logging setup.
//!
//! The TUI owns the terminal, so logs go to `$HELIOS_HOME/logs/helios.log`
//! through a non-blocking appender. Keep the returned guard alive until
//! exit or buffered lines are lost.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Env var that overrides the configured log filter.
pub const LOG_ENV: &str = "HELIOS_LOG";

const LOG_FILE_NAME: &str = "helios.log";

/// Installs the global subscriber writing to `dir/helios.log`.
pub fn init(dir: &Path, configured_level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = resolve_filter(std::env::var(LOG_ENV).ok().as_deref(), configured_level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}

/// Picks the filter: env directive, then config, then `info`.
///
/// Invalid directives fall back instead of failing startup.
fn resolve_filter(env_directive: Option<&str>, configured_level: &str) -> EnvFilter {
    [env_directive, Some(configured_level)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .find_map(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
