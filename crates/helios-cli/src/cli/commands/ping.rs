//! Backend health check.

use anyhow::{Context, Result};
use helios_core::api::BackendClient;
use helios_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = BackendClient::new(config.backend.clone());
    let health = client
        .health()
        .await
        .with_context(|| format!("ping backend at {}", client.base_url()))?;

    let message = if health.message.trim().is_empty() {
        "ok"
    } else {
        health.message.trim()
    };
    match health.version.as_deref() {
        Some(version) => println!("{message} (version {version})"),
        None => println!("{message}"),
    }
    Ok(())
}
