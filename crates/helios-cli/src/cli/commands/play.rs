//! Interactive session (the default command).

use anyhow::{Context, Result};
use helios_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    tracing::info!(variant = %config.variant, "starting interactive session");
    helios_tui::run_interactive(config).context("interactive session failed")
}
