//! HTTP client for the game backend.
//!
//! Every call is a single JSON request with no retry and no timeout. Callers
//! decide what a failure means; this module only reports it.

mod types;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
pub use types::*;

use crate::config::BackendConfig;
use crate::domain::{CharacterProfile, EchoChamberData, EchoChoice};

/// Game backend client.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Creates a backend-side player and returns its record.
    pub async fn create_player(&self, username: &str) -> Result<CreatePlayerResponse> {
        let path = self.config.endpoints.create_character.clone();
        self.post_json(&path, &CreatePlayerRequest { username })
            .await
            .context("create player")
    }

    /// Sends one chat turn to an NPC.
    pub async fn chat(&self, player_id: &str, npc_id: &str, message: &str) -> Result<ChatReply> {
        let path = self.config.endpoints.chat.clone();
        let body = ChatRequest {
            player_id,
            npc_id,
            message,
        };
        self.post_json(&path, &body)
            .await
            .with_context(|| format!("chat with {npc_id}"))
    }

    /// Fetches the introspection monologue and both choice labels.
    pub async fn enter_echo_chamber(&self, player_id: &str) -> Result<EchoChamberData> {
        let path = self.config.endpoints.enter_echo_chamber.clone();
        self.post_json(&path, &PlayerIdRequest { player_id })
            .await
            .context("enter echo chamber")
    }

    /// Posts the player's echo chamber choice.
    pub async fn resolve_echo_chamber(
        &self,
        player_id: &str,
        choice: EchoChoice,
    ) -> Result<ResolveResponse> {
        let path = self.config.endpoints.resolve_echo_chamber.clone();
        self.post_json(&path, &ResolveRequest { player_id, choice })
            .await
            .context("resolve echo chamber")
    }

    /// Registers a scene character under a client-generated player id.
    pub async fn create_scene_character(
        &self,
        player_id: &str,
        profile: &CharacterProfile,
    ) -> Result<SceneCharacterResponse> {
        let path = self.config.endpoints.scene_create_character.clone();
        let body = SceneCharacterRequest {
            player_id,
            identity: profile.identity.trim(),
            motivation: profile.motivation.trim(),
        };
        let response = self.send(self.http.post(self.config.url(&path)).json(&body)).await?;
        // Some scene backends answer 201/204 with no body.
        let text = response.text().await.context("read scene character body")?;
        if text.trim().is_empty() {
            return Ok(SceneCharacterResponse::default());
        }
        serde_json::from_str(&text).context("decode scene character response")
    }

    /// Sends one scene dialogue turn to a character.
    pub async fn scene_dialogue(
        &self,
        player_id: &str,
        character_id: &str,
        message: &str,
    ) -> Result<SceneReply> {
        let path = self.config.endpoints.scene_dialogue.clone();
        let body = SceneDialogueRequest {
            player_id,
            character_id,
            message,
        };
        self.post_json(&path, &body)
            .await
            .with_context(|| format!("scene dialogue with {character_id}"))
    }

    /// Calls the backend root endpoint.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.config.url("");
        let response = self.send(self.http.get(&url)).await?;
        response
            .json::<HealthResponse>()
            .await
            .with_context(|| format!("decode health response from {url}"))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.url(path);
        tracing::debug!(%url, "POST");
        let response = self.send(self.http.post(&url).json(body)).await?;
        response
            .json::<R>()
            .await
            .with_context(|| format!("decode response from {url}"))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request.send().await.context("backend request failed")?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &url, &body))
    }
}

fn status_error(status: StatusCode, url: &str, body: &str) -> anyhow::Error {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail_text())
        .unwrap_or_else(|_| body.trim().to_string());
    if detail.is_empty() {
        anyhow::anyhow!("backend returned {status} for {url}")
    } else {
        anyhow::anyhow!("backend returned {status} for {url}: {detail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_fastapi_detail() {
        let err = status_error(
            StatusCode::NOT_FOUND,
            "http://x/api/chat",
            r#"{"detail":"player not found"}"#,
        );
        assert_eq!(
            err.to_string(),
            "backend returned 404 Not Found for http://x/api/chat: player not found"
        );
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let err = status_error(StatusCode::BAD_GATEWAY, "http://x/", "upstream down\n");
        assert!(err.to_string().ends_with(": upstream down"));
    }

    #[test]
    fn test_status_error_without_body() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "http://x/", "");
        assert_eq!(
            err.to_string(),
            "backend returned 500 Internal Server Error for http://x/"
        );
    }
}
