//! Echo chamber view: the introspection monologue and its two choices.

mod render;

use crossterm::event::{KeyCode, KeyEvent};
use helios_core::domain::{BeliefSystem, EchoChamberData, EchoChoice};
pub use render::render_echo_chamber;

#[derive(Debug, Clone)]
pub struct EchoChamberState {
    /// Payload from the enter call; `None` until it arrives.
    pub data: Option<EchoChamberData>,
    /// Choice the Enter key would pick.
    pub highlighted: EchoChoice,
    /// Weights returned by the resolve call, shown until the status push.
    pub beliefs: Option<BeliefSystem>,
    /// A choice was posted for this round.
    pub resolved: bool,
    /// The enter or resolve call is in flight.
    pub loading: bool,
}

impl Default for EchoChamberState {
    fn default() -> Self {
        Self {
            data: None,
            highlighted: EchoChoice::Survival,
            beliefs: None,
            resolved: false,
            loading: false,
        }
    }
}

impl EchoChamberState {
    /// Drops everything from the current round.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Maps a key to a choice, moving the highlight for navigation keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<EchoChoice> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.highlighted = other(self.highlighted);
                None
            }
            KeyCode::Char('a' | 'A' | '1') => Some(EchoChoice::Survival),
            KeyCode::Char('b' | 'B' | '2') => Some(EchoChoice::Idealism),
            KeyCode::Enter => Some(self.highlighted),
            _ => None,
        }
    }

    /// Label the backend gave for a choice.
    pub fn label(&self, choice: EchoChoice) -> Option<&str> {
        let data = self.data.as_ref()?;
        Some(match choice {
            EchoChoice::Survival => data.choice_a.as_str(),
            EchoChoice::Idealism => data.choice_b.as_str(),
        })
    }
}

fn other(choice: EchoChoice) -> EchoChoice {
    match choice {
        EchoChoice::Survival => EchoChoice::Idealism,
        EchoChoice::Idealism => EchoChoice::Survival,
    }
}
