//! Realtime status subscription (Supabase Realtime over Phoenix channels).
//!
//! Joins a channel filtered to one player row and reports every `status`
//! value carried by an `UPDATE` change. Runs until the cancellation token
//! fires or the socket closes; there is no reconnect.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::RealtimeConfig;
use crate::domain::PlayerStatus;

const PROTOCOL_VERSION: &str = "1.0.0";
const JOIN_REF: &str = "1";

/// A decoded server frame we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeFrame {
    /// A row change carrying the player's new status string.
    StatusChanged(String),
    /// Reply to our join; `ok` is false when the server refused it.
    JoinReply { ok: bool, reason: Option<String> },
    /// Anything else (heartbeat replies, presence, system notices).
    Other,
}

/// Channel topic for one player's status updates.
pub fn topic(player_id: &str) -> String {
    format!("realtime:player-status-updates-{player_id}")
}

/// Builds the websocket URL from the project URL and key.
pub fn websocket_url(config: &RealtimeConfig) -> Result<Url> {
    let mut url = Url::parse(config.url.trim())
        .with_context(|| format!("Invalid realtime URL: {}", config.url))?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => anyhow::bail!("Unsupported realtime URL scheme '{other}'"),
    };
    url.set_scheme(scheme)
        .map_err(|()| anyhow::anyhow!("Cannot use scheme {scheme} for {}", config.url))?;

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/realtime/v1/websocket"));
    url.query_pairs_mut()
        .clear()
        .append_pair("apikey", &config.api_key)
        .append_pair("vsn", PROTOCOL_VERSION);
    Ok(url)
}

/// Join frame asking for `UPDATE` changes on the player's row.
pub fn join_frame(config: &RealtimeConfig, player_id: &str) -> String {
    json!({
        "topic": topic(player_id),
        "event": "phx_join",
        "payload": {
            "config": {
                "broadcast": { "self": false },
                "presence": { "key": "" },
                "postgres_changes": [{
                    "event": "UPDATE",
                    "schema": config.schema,
                    "table": config.table,
                    "filter": format!("id=eq.{player_id}"),
                }],
            },
            "access_token": config.api_key,
        },
        "ref": JOIN_REF,
        "join_ref": JOIN_REF,
    })
    .to_string()
}

/// Keep-alive frame; Phoenix drops sockets that stay silent.
pub fn heartbeat_frame(seq: u64) -> String {
    json!({
        "topic": "phoenix",
        "event": "heartbeat",
        "payload": {},
        "ref": seq.to_string(),
    })
    .to_string()
}

/// Leave frame sent on teardown.
pub fn leave_frame(player_id: &str, seq: u64) -> String {
    json!({
        "topic": topic(player_id),
        "event": "phx_leave",
        "payload": {},
        "ref": seq.to_string(),
        "join_ref": JOIN_REF,
    })
    .to_string()
}

/// Decodes a text frame. Malformed JSON decodes as `Other`.
pub fn parse_frame(text: &str) -> RealtimeFrame {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return RealtimeFrame::Other;
    };
    let event = value.get("event").and_then(Value::as_str).unwrap_or("");
    let payload = value.get("payload").unwrap_or(&Value::Null);

    match event {
        "postgres_changes" => {
            let status = payload
                .pointer("/data/record/status")
                .and_then(Value::as_str);
            match status {
                Some(status) => RealtimeFrame::StatusChanged(status.to_string()),
                None => RealtimeFrame::Other,
            }
        }
        "phx_reply" if value.get("ref").and_then(Value::as_str) == Some(JOIN_REF) => {
            let ok = payload.get("status").and_then(Value::as_str) == Some("ok");
            let reason = (!ok)
                .then(|| payload.get("response").map(Value::to_string))
                .flatten();
            RealtimeFrame::JoinReply { ok, reason }
        }
        _ => RealtimeFrame::Other,
    }
}

/// Runs the subscription until `cancel` fires or the server closes.
///
/// Every pushed status goes to `on_status`, in arrival order.
pub async fn run_status_subscription<F>(
    config: RealtimeConfig,
    player_id: String,
    cancel: CancellationToken,
    mut on_status: F,
) -> Result<()>
where
    F: FnMut(PlayerStatus) + Send,
{
    let url = websocket_url(&config)?;
    let (socket, _) = connect_async(url.as_str())
        .await
        .context("connect to realtime")?;
    tracing::info!(topic = %topic(&player_id), "realtime connected");

    let (mut write, mut read) = socket.split();
    write
        .send(WsMessage::Text(join_frame(&config, &player_id)))
        .await
        .context("send realtime join")?;

    let period = Duration::from_secs(config.heartbeat_secs.max(1));
    let mut heartbeat = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    let mut seq: u64 = 1;

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                seq += 1;
                let _ = write.send(WsMessage::Text(leave_frame(&player_id, seq))).await;
                let _ = write.close().await;
                tracing::info!("realtime subscription released");
                return Ok(());
            }
            _ = heartbeat.tick() => {
                seq += 1;
                write
                    .send(WsMessage::Text(heartbeat_frame(seq)))
                    .await
                    .context("send realtime heartbeat")?;
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(WsMessage::Text(text))) => match parse_frame(&text) {
                        RealtimeFrame::StatusChanged(status) => {
                            tracing::info!(%status, "player status pushed");
                            on_status(PlayerStatus::from_wire(&status));
                        }
                        RealtimeFrame::JoinReply { ok: true, .. } => {
                            tracing::debug!("realtime channel joined");
                        }
                        RealtimeFrame::JoinReply { ok: false, reason } => {
                            anyhow::bail!(
                                "realtime join refused: {}",
                                reason.unwrap_or_else(|| "no reason given".to_string())
                            );
                        }
                        RealtimeFrame::Other => {}
                    },
                    Some(Ok(WsMessage::Close(_))) | None => {
                        tracing::warn!("realtime socket closed by server");
                        return Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("realtime socket error"),
                }
            }
        }
    }
}
