//! Scene character creation form.

mod render;
mod state;
mod update;

pub use render::render_creation_form;
pub use state::{CreationField, CreationForm};
pub use update::{CreationAction, handle_key};
