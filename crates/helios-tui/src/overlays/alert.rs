//! Blocking alert: a message that must be dismissed before anything else.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_message_overlay};
use crate::effects::UiEffect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub message: String,
}

impl AlertState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("Enter", "ok")];
        render_message_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Notice",
                border_color: Color::Red,
                width: 50,
                height: 6,
                hints: &hints,
            },
            &self.message,
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::Quit])
            }
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }
}
