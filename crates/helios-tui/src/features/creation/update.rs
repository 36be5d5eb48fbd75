//! Creation form key handling.

use crossterm::event::{KeyCode, KeyEvent};

use super::CreationForm;

/// What a key press on the form asks the reducer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationAction {
    None,
    Submit,
}

pub fn handle_key(form: &mut CreationForm, key: KeyEvent) -> CreationAction {
    match key.code {
        KeyCode::Enter => CreationAction::Submit,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.focus = form.focus.next();
            CreationAction::None
        }
        _ => {
            form.focused_mut().input(key);
            CreationAction::None
        }
    }
}
