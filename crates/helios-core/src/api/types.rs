//! Request and response bodies for the game backend.

use serde::{Deserialize, Serialize};

use crate::domain::{BeliefSystem, EchoChoice};

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlayerRequest<'a> {
    pub username: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayerResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Missing when the backend accepted the call but stored nothing.
    #[serde(default)]
    pub player_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub player_id: &'a str,
    pub npc_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub character_id: Option<String>,
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub dialogue: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerIdRequest<'a> {
    pub player_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveRequest<'a> {
    pub player_id: &'a str,
    pub choice: EchoChoice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub new_beliefs: Option<BeliefSystem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneCharacterRequest<'a> {
    pub player_id: &'a str,
    pub identity: &'a str,
    pub motivation: &'a str,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SceneCharacterResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneDialogueRequest<'a> {
    pub player_id: &'a str,
    pub character_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneReply {
    #[serde(default)]
    pub dialogue: Option<String>,
    #[serde(default, alias = "character_name")]
    pub speaker: Option<String>,
}

/// Root endpoint payload (`GET /`).
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// FastAPI-style error body (`{"detail": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub(crate) fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
