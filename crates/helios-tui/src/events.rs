//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, timer ticks, and the
//! results of effects the runtime ran on its behalf. Result payloads carry
//! `Result<T, String>` with the error chain already formatted.

use crossterm::event::Event;
use helios_core::domain::{BeliefSystem, CharacterProfile, EchoChamberData, PlayerStatus};

/// A dialogue reply, normalized across both backend contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueReply {
    pub dialogue: Option<String>,
    pub speaker: Option<String>,
}

/// A scene character the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCharacter {
    pub player_id: String,
    pub profile: CharacterProfile,
}

#[derive(Debug)]
pub enum UiEvent {
    /// The view is on screen for the first time.
    Mounted,
    /// Frame timer.
    Tick,
    /// Raw terminal input.
    Terminal(Event),

    /// Result of creating the prism player.
    PlayerCreated { result: Result<String, String> },
    /// Result of a chat or scene dialogue turn.
    DialogueReplied { result: Result<DialogueReply, String> },
    /// Result of fetching the echo chamber payload.
    EchoChamberLoaded {
        result: Result<EchoChamberData, String>,
    },
    /// Result of posting an echo chamber choice.
    EchoChamberResolved {
        result: Result<Option<BeliefSystem>, String>,
    },
    /// Result of registering a scene character.
    SceneCharacterCreated {
        result: Result<SceneCharacter, String>,
    },

    /// A status value pushed by the realtime channel.
    StatusPushed(PlayerStatus),
    /// The realtime subscription stopped.
    SubscriptionEnded { result: Result<(), String> },
}
