//! Prompt shown when the backend flags the player for the echo chamber.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_message_overlay};
use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::state::TuiState;

const PROMPT_TEXT: &str =
    "Something stirs in your mind. The world asks you to look inward. Enter the Echo Chamber?";

#[derive(Debug, Clone, Default)]
pub struct EchoPromptState;

impl EchoPromptState {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [
            InputHint::new("Y/Enter", "enter"),
            InputHint::new("N/Esc", "not now"),
        ];
        render_message_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "The Echo Chamber calls",
                border_color: Color::LightMagenta,
                width: 56,
                height: 7,
                hints: &hints,
            },
            PROMPT_TEXT,
        );
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                OverlayUpdate::close().with_ui_effects(vec![UiEffect::Quit])
            }
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => match &tui.session.player_id {
                Some(player_id) => OverlayUpdate::close()
                    .with_mutations(vec![StateMutation::BeginEchoChamber])
                    .with_ui_effects(vec![UiEffect::EnterEchoChamber {
                        player_id: player_id.clone(),
                    }]),
                None => OverlayUpdate::close(),
            },
            KeyCode::Esc | KeyCode::Char('n' | 'N') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }
}
