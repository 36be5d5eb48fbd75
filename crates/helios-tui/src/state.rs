//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: SessionState   (player id, backend status)
//! │   ├── transcript: TranscriptState
//! │   ├── input: LineBuffer       (chat input)
//! │   ├── creation: CreationForm  (scene variant only)
//! │   └── echo: EchoChamberState  (prism variant only)
//! └── overlay: Option<Overlay>    (modal prompt or alert)
//! ```
//!
//! `TuiState` and the overlay live side by side so overlay handlers can
//! borrow the overlay mutably while reading `TuiState`.

use helios_core::config::{Config, Variant};
use helios_core::domain::{Npc, PlayerStatus};

use crate::creation::CreationForm;
use crate::echo_chamber::EchoChamberState;
use crate::input::LineBuffer;
use crate::overlays::Overlay;
use crate::transcript::TranscriptState;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Scene character creation form.
    Creation,
    /// Transcript plus input (or the echo chamber panel).
    Conversation,
}

/// The player's session as the client knows it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Unset until creation succeeds; input stays disabled without it.
    pub player_id: Option<String>,
    pub status: PlayerStatus,
}

impl SessionState {
    pub fn in_echo_chamber(&self) -> bool {
        self.status == PlayerStatus::RequiresEchoChamber
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    pub should_quit: bool,
    pub variant: Variant,
    /// Name sent when the prism player is created.
    pub username: String,
    pub screen: Screen,
    pub session: SessionState,
    pub transcript: TranscriptState,
    /// Chat input.
    pub input: LineBuffer,
    pub creation: CreationForm,
    pub echo: EchoChamberState,
    /// Conversational partners, in display order.
    pub partners: Vec<Npc>,
    /// Index into `partners` that Enter sends to.
    pub selected_partner: usize,
    /// A chat or creation request is in flight; submissions are ignored
    /// meanwhile. Echo chamber calls track their own flag.
    pub loading: bool,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: &Config) -> Self {
        let screen = match config.variant {
            Variant::Prism => Screen::Conversation,
            Variant::Scene => Screen::Creation,
        };
        Self {
            should_quit: false,
            variant: config.variant,
            username: config.username.clone(),
            screen,
            session: SessionState::default(),
            transcript: TranscriptState::default(),
            input: LineBuffer::default(),
            creation: CreationForm::default(),
            echo: EchoChamberState::default(),
            partners: config.npcs.clone(),
            selected_partner: 0,
            loading: false,
            spinner_frame: 0,
        }
    }

    pub fn selected_partner(&self) -> Option<&Npc> {
        self.partners.get(self.selected_partner)
    }

    /// Any request is in flight (drives the spinner and frame rate).
    pub fn is_busy(&self) -> bool {
        self.loading || self.echo.loading
    }

    /// Whether the chat input accepts a submission right now.
    pub fn can_submit(&self) -> bool {
        self.session.player_id.is_some()
            && !self.loading
            && self.screen == Screen::Conversation
            && !self.session.in_echo_chamber()
    }
}
