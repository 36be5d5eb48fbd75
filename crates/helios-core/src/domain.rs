//! UI-agnostic session types shared by the backend client and the TUI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Npc,
}

/// One line of the session transcript.
///
/// Messages are only ever appended; nothing edits or removes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Display label for the speaker (NPC or scene character name).
    pub speaker: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            speaker: None,
        }
    }

    pub fn npc(text: impl Into<String>, speaker: Option<String>) -> Self {
        Self {
            sender: Sender::Npc,
            text: text.into(),
            speaker: speaker.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Backend-side status of the player record.
///
/// The backend writes arbitrary strings; anything that is not the echo
/// chamber flag counts as active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Active,
    RequiresEchoChamber,
}

impl PlayerStatus {
    pub const REQUIRES_ECHO_CHAMBER: &str = "requires_echo_chamber";

    pub fn from_wire(status: &str) -> Self {
        if status == Self::REQUIRES_ECHO_CHAMBER {
            PlayerStatus::RequiresEchoChamber
        } else {
            PlayerStatus::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Active => "active",
            PlayerStatus::RequiresEchoChamber => Self::REQUIRES_ECHO_CHAMBER,
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Introspection payload shown inside the echo chamber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoChamberData {
    pub monologue: String,
    pub choice_a: String,
    pub choice_b: String,
}

/// The two belief directions a player can pick in the echo chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EchoChoice {
    /// Bound to `choice_a`.
    Survival,
    /// Bound to `choice_b`.
    Idealism,
}

impl EchoChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            EchoChoice::Survival => "survival",
            EchoChoice::Idealism => "idealism",
        }
    }
}

/// Belief weights returned after resolving the echo chamber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BeliefSystem {
    #[serde(default)]
    pub survival: f64,
    #[serde(default)]
    pub idealism: f64,
}

/// A conversational partner the player can address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
}

/// Free-text fields of the scene character creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub identity: String,
    pub motivation: String,
}

impl CharacterProfile {
    /// Both fields must carry something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.identity.trim().is_empty() && !self.motivation.trim().is_empty()
    }
}

/// Shortens a player id for display (`abcdef12...`).
pub fn short_id(id: &str) -> String {
    let head: String = id.chars().take(8).collect();
    format!("{head}...")
}
