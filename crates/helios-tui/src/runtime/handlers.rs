//! Effect handlers for the TUI runtime.
//!
//! Each handler is an async function that performs one backend call and
//! returns the `UiEvent` carrying its result. Failures are logged here, at
//! the call site, and handed to the reducer as `Err(String)`.

use helios_core::api::BackendClient;
use helios_core::config::RealtimeConfig;
use helios_core::domain::{CharacterProfile, EchoChoice};
use helios_core::realtime;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::UiEventSender;
use crate::events::{DialogueReply, SceneCharacter, UiEvent};

fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

pub async fn create_player(client: BackendClient, username: String) -> UiEvent {
    let result = match client.create_player(&username).await {
        Ok(response) => match response.player_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => {
                tracing::info!(player_id = %id, "player created");
                Ok(id)
            }
            None => {
                let reason = response
                    .message
                    .unwrap_or_else(|| "backend returned no player_id".to_string());
                tracing::error!(%reason, "player creation returned no id");
                Err(reason)
            }
        },
        Err(e) => {
            tracing::error!(error = %describe(&e), "player creation failed");
            Err(describe(&e))
        }
    };
    UiEvent::PlayerCreated { result }
}

pub async fn send_chat(
    client: BackendClient,
    player_id: String,
    npc_id: String,
    message: String,
) -> UiEvent {
    let result = client
        .chat(&player_id, &npc_id, &message)
        .await
        .map(|reply| DialogueReply {
            dialogue: reply.dialogue,
            speaker: reply.character_name,
        })
        .map_err(|e| {
            tracing::error!(error = %describe(&e), %npc_id, "chat failed");
            describe(&e)
        });
    UiEvent::DialogueReplied { result }
}

pub async fn send_scene_dialogue(
    client: BackendClient,
    player_id: String,
    character_id: String,
    message: String,
) -> UiEvent {
    let result = client
        .scene_dialogue(&player_id, &character_id, &message)
        .await
        .map(|reply| DialogueReply {
            dialogue: reply.dialogue,
            speaker: reply.speaker,
        })
        .map_err(|e| {
            tracing::error!(error = %describe(&e), %character_id, "scene dialogue failed");
            describe(&e)
        });
    UiEvent::DialogueReplied { result }
}

pub async fn enter_echo_chamber(client: BackendClient, player_id: String) -> UiEvent {
    let result = client.enter_echo_chamber(&player_id).await.map_err(|e| {
        tracing::error!(error = %describe(&e), "entering echo chamber failed");
        describe(&e)
    });
    UiEvent::EchoChamberLoaded { result }
}

pub async fn resolve_echo_chamber(
    client: BackendClient,
    player_id: String,
    choice: EchoChoice,
) -> UiEvent {
    let result = match client.resolve_echo_chamber(&player_id, choice).await {
        Ok(response) => {
            if let Some(beliefs) = &response.new_beliefs {
                tracing::info!(
                    choice = choice.as_str(),
                    survival = beliefs.survival,
                    idealism = beliefs.idealism,
                    "echo chamber resolved"
                );
            }
            Ok(response.new_beliefs)
        }
        Err(e) => {
            tracing::error!(error = %describe(&e), "resolving echo chamber failed");
            Err(describe(&e))
        }
    };
    UiEvent::EchoChamberResolved { result }
}

/// Registers a scene character under a fresh random player id.
pub async fn create_scene_character(client: BackendClient, profile: CharacterProfile) -> UiEvent {
    let player_id = Uuid::new_v4().to_string();
    let result = match client.create_scene_character(&player_id, &profile).await {
        Ok(response) => {
            tracing::info!(
                %player_id,
                status = response.status.as_deref().unwrap_or("ok"),
                "scene character created"
            );
            Ok(SceneCharacter { player_id, profile })
        }
        Err(e) => {
            tracing::error!(error = %describe(&e), "scene character creation failed");
            Err(describe(&e))
        }
    };
    UiEvent::SceneCharacterCreated { result }
}

/// Streams pushed statuses into the inbox until `cancel` fires.
pub async fn subscribe_status(
    config: RealtimeConfig,
    player_id: String,
    cancel: CancellationToken,
    inbox: UiEventSender,
) -> UiEvent {
    let result = realtime::run_status_subscription(config, player_id, cancel, move |status| {
        let _ = inbox.send(UiEvent::StatusPushed(status));
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %describe(&e), "status subscription failed");
        describe(&e)
    });
    UiEvent::SubscriptionEnded { result }
}
