//! WebSocket handler
//!
//! Accepts a connection, gates it behind Identify, then pumps roster events
//! to the client until it disconnects.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, timeout, Instant};
use uuid::Uuid;

use prio_common::SessionClaims;
use prio_core::PresenceEntry;

use crate::protocol::{ClientMessage, ReadyPayload, ServerMessage};
use crate::roster::RosterEvent;
use crate::server::GatewayState;

/// Expected heartbeat interval advertised to clients, in milliseconds
const HEARTBEAT_INTERVAL_MS: u64 = 45_000;

/// Timeout for no heartbeat before considering the connection dead
const HEARTBEAT_TIMEOUT_MS: u64 = 90_000;

/// Time allowed for the first Identify frame
const IDENTIFY_TIMEOUT_MS: u64 = 10_000;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    // The first frame must be a valid Identify
    let claims = match identify(&state, &mut ws_stream).await {
        Ok(claims) => claims,
        Err(reason) => {
            tracing::debug!(%reason, "Connection failed to identify");
            let _ = send(&mut ws_sink, &ServerMessage::Error { message: reason }).await;
            let _ = ws_sink.close().await;
            return;
        }
    };

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => {
            let _ = send(
                &mut ws_sink,
                &ServerMessage::Error {
                    message: "Invalid session subject".to_string(),
                },
            )
            .await;
            return;
        }
    };

    tracing::info!(user_id = %user_id, name = %claims.name, "Gateway connection identified");

    // Ready, then the current member set
    let ready = ServerMessage::Ready {
        data: ReadyPayload {
            user_id,
            display_name: claims.name.clone(),
            is_officer: claims.officer,
            heartbeat_interval: HEARTBEAT_INTERVAL_MS,
        },
    };
    if !send(&mut ws_sink, &ready).await {
        return;
    }

    let snapshot = ServerMessage::Roster {
        event: RosterEvent::Snapshot {
            members: state.roster().snapshot(),
        },
    };
    if !send(&mut ws_sink, &snapshot).await {
        return;
    }

    let mut events = state.roster().subscribe();
    let mut announced = false;
    let mut last_heartbeat = Instant::now();
    let mut ticker = interval(Duration::from_millis(HEARTBEAT_INTERVAL_MS));

    loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if !handle_client_message(
                            &state,
                            &claims,
                            user_id,
                            &text,
                            &mut announced,
                            &mut last_heartbeat,
                            &mut ws_sink,
                        )
                        .await
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // binary/ping/pong frames are ignored
                    Some(Err(e)) => {
                        tracing::debug!(user_id = %user_id, error = %e, "WebSocket read error");
                        break;
                    }
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if !send(&mut ws_sink, &ServerMessage::Roster { event }).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Fell behind the event stream; resync with a snapshot
                        tracing::warn!(user_id = %user_id, skipped, "Roster stream lagged, resyncing");
                        let resync = ServerMessage::Roster {
                            event: RosterEvent::Snapshot {
                                members: state.roster().snapshot(),
                            },
                        };
                        if !send(&mut ws_sink, &resync).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ticker.tick() => {
                if last_heartbeat.elapsed() > Duration::from_millis(HEARTBEAT_TIMEOUT_MS) {
                    tracing::debug!(user_id = %user_id, "Heartbeat timeout");
                    break;
                }
            }
        }
    }

    // The member leaves only when its last connection is gone
    if announced {
        state.roster().leave(user_id);
    }

    tracing::info!(user_id = %user_id, "Gateway connection closed");
}

/// Wait for the Identify frame and verify its session token
async fn identify(
    state: &GatewayState,
    ws_stream: &mut SplitStream<WebSocket>,
) -> Result<SessionClaims, String> {
    let frame = timeout(
        Duration::from_millis(IDENTIFY_TIMEOUT_MS),
        ws_stream.next(),
    )
    .await
    .map_err(|_| "Identify timed out".to_string())?;

    let text = match frame {
        Some(Ok(Message::Text(text))) => text,
        _ => return Err("Expected an Identify message".to_string()),
    };

    match ClientMessage::from_json(&text) {
        Ok(ClientMessage::Identify { token }) => state
            .session_service()
            .verify(&token)
            .map_err(|e| e.to_string()),
        Ok(_) => Err("Expected an Identify message".to_string()),
        Err(_) => Err("Malformed message".to_string()),
    }
}

/// Process one client message; returns false when the connection should close
async fn handle_client_message(
    state: &GatewayState,
    claims: &SessionClaims,
    user_id: Uuid,
    text: &str,
    announced: &mut bool,
    last_heartbeat: &mut Instant,
    ws_sink: &mut SplitSink<WebSocket, Message>,
) -> bool {
    match ClientMessage::from_json(text) {
        Ok(ClientMessage::Announce { avatar }) => {
            // Identity comes from the verified session; the announce payload
            // only contributes the avatar
            let entry = PresenceEntry::new(
                user_id,
                claims.name.clone(),
                avatar.or_else(|| claims.avatar.clone()),
                claims.officer,
            );
            if *announced {
                state.roster().refresh(entry);
            } else {
                state.roster().join(entry);
                *announced = true;
            }
            true
        }
        Ok(ClientMessage::Heartbeat) => {
            *last_heartbeat = Instant::now();
            send(ws_sink, &ServerMessage::HeartbeatAck).await
        }
        Ok(ClientMessage::Identify { .. }) => {
            // Already identified; ignore
            true
        }
        Err(e) => {
            tracing::debug!(user_id = %user_id, error = %e, "Malformed client message");
            true
        }
    }
}

/// Send one message, returning false if the socket is gone
async fn send(ws_sink: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> bool {
    match message.to_json() {
        Ok(json) => ws_sink.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize server message");
            true
        }
    }
}
