//! Shared helpers used by several feature slices.

pub mod text;

pub use text::{sanitize_for_display, truncate_with_ellipsis, wrap_text};

/// Spinner frames for the loading indicator.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Returns the spinner glyph for a tick counter.
pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}
