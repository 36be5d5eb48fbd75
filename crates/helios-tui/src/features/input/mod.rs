//! Input feature slice.

mod line_buffer;
mod render;

pub use line_buffer::{CursorMove, LineBuffer};
pub use render::{InputBox, render_input_box};
