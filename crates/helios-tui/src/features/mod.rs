//! Feature slices for the TUI (state/update/render per slice).

pub mod creation;
pub mod echo_chamber;
pub mod input;
pub mod transcript;
