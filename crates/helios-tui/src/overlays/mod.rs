//! Overlay modules for the TUI.
//!
//! Overlays are modal: while one is open it receives every key. Each
//! overlay owns its state, key handler, and render function.

pub mod alert;
pub mod echo_prompt;
pub mod render_utils;

pub use alert::AlertState;
use crossterm::event::KeyEvent;
pub use echo_prompt::EchoPromptState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    EchoPrompt(EchoPromptState),
    Alert(AlertState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::EchoPrompt(p) => p.render(frame, area),
            Overlay::Alert(a) => a.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::EchoPrompt(p) => p.handle_key(tui, key),
            Overlay::Alert(a) => a.handle_key(key),
        }
    }
}

/// Routes a key to the active overlay, if any.
///
/// Returns `None` when no overlay is open so the caller can handle the key.
pub fn handle_overlay_key(
    tui: &TuiState,
    overlay: &mut Option<Overlay>,
    key: KeyEvent,
) -> Option<OverlayUpdate> {
    let update = overlay.as_mut()?.handle_key(tui, key);
    if update.transition == OverlayTransition::Close {
        *overlay = None;
    }
    Some(update)
}

/// Extension trait for `Option<Overlay>` rendering.
pub trait OverlayExt {
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use helios_core::config::Config;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_no_overlay_passes_key_through() {
        let tui = TuiState::new(&Config::default());
        let mut overlay = None;
        assert!(handle_overlay_key(&tui, &mut overlay, key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_alert_closes_on_enter() {
        let tui = TuiState::new(&Config::default());
        let mut overlay = Some(Overlay::Alert(AlertState::new("Nope")));
        let update = handle_overlay_key(&tui, &mut overlay, key(KeyCode::Enter)).unwrap();
        assert_eq!(update.transition, OverlayTransition::Close);
        assert!(overlay.is_none());
    }

    #[test]
    fn test_alert_swallows_other_keys() {
        let tui = TuiState::new(&Config::default());
        let mut overlay = Some(Overlay::Alert(AlertState::new("Nope")));
        let update = handle_overlay_key(&tui, &mut overlay, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(update.transition, OverlayTransition::Stay);
        assert!(overlay.is_some());
    }

    #[test]
    fn test_echo_prompt_accept_without_player_just_closes() {
        let tui = TuiState::new(&Config::default());
        let mut overlay = Some(Overlay::EchoPrompt(EchoPromptState));
        let update = handle_overlay_key(&tui, &mut overlay, key(KeyCode::Char('y'))).unwrap();
        assert!(update.effects.is_empty());
        assert!(update.mutations.is_empty());
        assert!(overlay.is_none());
    }
}
