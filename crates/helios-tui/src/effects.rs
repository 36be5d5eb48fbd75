//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They describe I/O only; the reducer never performs it directly.

use helios_core::domain::{CharacterProfile, EchoChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Release the realtime subscription and leave the event loop.
    Quit,

    /// Create the prism player record.
    CreatePlayer { username: String },

    /// Send one chat turn to an NPC.
    SendChat {
        player_id: String,
        npc_id: String,
        message: String,
    },

    /// Send one scene dialogue turn to a character.
    SendSceneDialogue {
        player_id: String,
        character_id: String,
        message: String,
    },

    /// Start the realtime status subscription for a player.
    SubscribeStatus { player_id: String },

    /// Fetch the echo chamber payload.
    EnterEchoChamber { player_id: String },

    /// Post the player's echo chamber choice.
    ResolveEchoChamber {
        player_id: String,
        choice: EchoChoice,
    },

    /// Register a scene character; the handler picks the player id.
    CreateSceneCharacter { profile: CharacterProfile },
}
