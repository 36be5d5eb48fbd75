//! Config command handlers.

use anyhow::{Context, Result};
use helios_core::config;

pub fn path() -> Result<()> {
    println!("{}", config::paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let path = config::paths::config_path();
    config::Config::init(&path)
        .with_context(|| format!("Failed to initialize config at {}", path.display()))?;
    println!("Created config at {}", path.display());
    Ok(())
}
