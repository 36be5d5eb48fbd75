//! Full-screen terminal client for the Helios chat game.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use features::{creation, echo_chamber, input, transcript};
use helios_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive session until the player quits.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Helios needs an interactive terminal.\n\
             Use `helios ping` to check the backend from scripts."
        );
    }

    let mut runtime = TuiRuntime::new(config)?;
    let result = runtime.run();
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    result
}
