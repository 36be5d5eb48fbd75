//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use helios_core::config::{self, Config, Variant};
use helios_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "helios")]
#[command(version)]
#[command(about = "Terminal client for the Helios chat game")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend contract to speak (overrides config)
    #[arg(long, env = "HELIOS_VARIANT", value_parser = ["prism", "scene"])]
    variant: Option<String>,

    /// Backend base URL (overrides config and HELIOS_BACKEND_URL)
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Display name used when creating a player
    #[arg(long, env = "HELIOS_USERNAME", value_name = "NAME")]
    username: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Ping,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

/// Settings passed on the command line, applied over the loaded config.
struct CliOverrides {
    variant: Option<String>,
    backend_url: Option<String>,
    username: Option<String>,
}

impl CliOverrides {
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(variant) = self.variant {
            config.variant = variant.parse::<Variant>()?;
        }
        if let Some(url) = self.backend_url.filter(|u| !u.trim().is_empty()) {
            config.backend.base_url = url.trim().to_string();
        }
        if let Some(name) = self.username.filter(|n| !n.trim().is_empty()) {
            config.username = name.trim().to_string();
        }
        config.validate()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        variant,
        backend_url,
        username,
    } = cli;
    let overrides = CliOverrides {
        variant,
        backend_url,
        username,
    };

    match command {
        // Config commands work even when the existing file does not parse.
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
        Some(Commands::Ping) => {
            let config = load_config(overrides)?;
            commands::ping::run(&config).await
        }
        None => {
            let config = load_config(overrides)?;
            let _log_guard = logging::init(&config::paths::logs_dir(), &config.log_level)
                .context("initialize logging")?;
            tracing::debug!(
                variant = %config.variant,
                backend = %config.backend.base_url,
                "config loaded"
            );
            commands::play::run(&config)
        }
    }
}

fn load_config(overrides: CliOverrides) -> Result<Config> {
    let mut config = Config::load().context("load config")?;
    overrides
        .apply(&mut config)
        .context("apply command line overrides")?;
    Ok(config)
}
