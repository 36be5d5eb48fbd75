//! Transcript feature slice: append-only message log with scrolling.

mod render;
mod state;
pub mod style;

pub use render::render_transcript;
pub use state::{DEFAULT_NPC_LABEL, ScrollMode, TranscriptState};
