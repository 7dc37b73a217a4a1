// WebSocket stream of committed mesh snapshots.

use crate::interface_adapters::protocol::encode_mesh_update;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::ids::connection_id;
use crate::use_cases::MeshSnapshot;

use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{Instrument, debug, error, info, info_span, warn};

#[derive(Debug, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Disconnect,
}

pub async fn snapshot_serializer(
    mut snapshot_rx: watch::Receiver<Arc<MeshSnapshot>>,
    snapshot_bytes_tx: watch::Sender<Utf8Bytes>,
) {
    // Serialize each committed snapshot once and share the bytes with every socket.
    loop {
        let snapshot = snapshot_rx.borrow_and_update().clone();
        match encode_mesh_update(&snapshot) {
            Ok(bytes) => {
                snapshot_bytes_tx.send_replace(bytes);
            }
            Err(e) => {
                error!(error = ?e, tick = snapshot.tick, "failed to serialize mesh update");
            }
        }

        if snapshot_rx.changed().await.is_err() {
            warn!("mesh snapshot channel closed; serializer exiting");
            break;
        }
    }
}

pub fn spawn_snapshot_serializer(state: &AppState) {
    tokio::spawn(snapshot_serializer(
        state.store.subscribe(),
        state.snapshot_bytes_tx.clone(),
    ));
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let updates = state.snapshot_bytes_tx.subscribe();
    // Connection id for correlating logs.
    let span = info_span!("conn", conn_id = connection_id());
    ws.on_upgrade(move |socket| handle_socket(socket, updates).instrument(span))
}

async fn handle_socket(mut socket: WebSocket, mut updates: watch::Receiver<Utf8Bytes>) {
    info!("client connected");
    let mut msgs_out: u64 = 0;
    let mut bytes_out: u64 = 0;

    // Late joiners get the latest committed snapshot immediately.
    let latest = updates.borrow_and_update().clone();
    let mut control = if latest.is_empty() {
        LoopControl::Continue
    } else {
        forward_snapshot(latest, &mut socket, &mut msgs_out, &mut bytes_out).await
    };

    while control == LoopControl::Continue {
        control = tokio::select! {
            incoming = socket.recv() => match incoming {
                // The stream is server-push only; inbound data frames are ignored.
                Some(Ok(Message::Close(_))) | None => LoopControl::Disconnect,
                Some(Ok(_)) => LoopControl::Continue,
                Some(Err(e)) => {
                    debug!(error = ?e, "socket receive error");
                    LoopControl::Disconnect
                }
            },
            changed = updates.changed() => match changed {
                Ok(()) => {
                    let bytes = updates.borrow_and_update().clone();
                    forward_snapshot(bytes, &mut socket, &mut msgs_out, &mut bytes_out).await
                }
                Err(_) => {
                    warn!("mesh updates channel closed; disconnecting");
                    LoopControl::Disconnect
                }
            },
        };
    }

    if let Err(err) = socket.close().await {
        debug!(error = ?err, "socket close error");
    }
    debug!(msgs_out, bytes_out, "connection stats");
    info!("client disconnected");
}

async fn forward_snapshot(
    snapshot: Utf8Bytes,
    socket: &mut WebSocket,
    msgs_out: &mut u64,
    bytes_out: &mut u64,
) -> LoopControl {
    let bytes_len = snapshot.len();
    match socket.send(Message::Text(snapshot)).await {
        Ok(()) => {
            *msgs_out += 1;
            *bytes_out += bytes_len as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Log unexpected send failures; disconnect will follow immediately.
            warn!(error = ?err, "failed to send mesh update");
            LoopControl::Disconnect
        }
    }
}
