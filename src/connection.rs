use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::room::{ClientMessage, ServerMessage};
use crate::server::AppState;

/// Body returned to plain HTTP requests (health checks, browser visits).
pub const BANNER: &str = "米字三子连线 WebSocket server";

pub async fn entry(
    State(state): State<AppState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_connection(socket, state))
            .into_response(),
        Err(_) => BANNER.into_response(),
    }
}

async fn handle_connection(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = state.orchestrator.lock().await.register(tx);
    info!(connection_id, "Client connected");

    // Cleared on every ping, set again by the matching pong.
    let alive = Arc::new(AtomicBool::new(true));
    let alive_for_send = alive.clone();
    let heartbeat_interval = state.heartbeat_interval;

    let mut send_task = tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(heartbeat_interval);
        // The first tick fires immediately.
        heartbeat.tick().await;

        loop {
            tokio::select! {
                outbound = rx.recv() => {
                    let Some(outbound) = outbound else { break };
                    let text = match outbound.to_json() {
                        Ok(text) => text,
                        Err(err) => {
                            warn!(connection_id, error = %err, "Failed to encode outbound message");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                _ = heartbeat.tick() => {
                    if !alive_for_send.swap(false, Ordering::AcqRel) {
                        warn!(connection_id, "No pong since last ping, closing connection");
                        let _ = sender.send(Message::Close(None)).await;
                        break;
                    }
                    if sender.send(Message::Ping(Default::default())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match ClientMessage::parse(text.as_str()) {
                    Ok(message) => state_for_recv
                        .orchestrator
                        .lock()
                        .await
                        .handle_message(connection_id, message),
                    Err(err) => {
                        debug!(connection_id, error = %err, "Dropping unparseable message")
                    }
                },
                Message::Pong(_) => alive.store(true, Ordering::Release),
                Message::Close(_) => break,
                Message::Binary(_) | Message::Ping(_) => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.orchestrator.lock().await.handle_disconnect(connection_id);
    info!(connection_id, "Client disconnected");
}
