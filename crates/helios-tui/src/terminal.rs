//! Terminal lifecycle.
//!
//! Raw mode and the alternate screen are entered once by the runtime and
//! undone on drop, on panic, and on the error path out of `run`.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type HeliosTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enables raw mode, enters the alternate screen, and turns on bracketed
/// paste so multi-line pastes arrive as one event.
///
/// Call `install_panic_hook()` first.
pub fn setup_terminal() -> Result<HeliosTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Restores the terminal. Safe to call more than once.
pub fn restore_terminal() -> Result<()> {
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before the panic
/// message is printed.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
