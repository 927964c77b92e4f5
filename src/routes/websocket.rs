// File Path: src/routes/websocket.rs

//! WebSocket navigation channel.
//!
//! Each text frame from the client is a path to navigate to. Every request
//! resolves on its own task against the connection's [`Navigator`], so a newer
//! request supersedes one still waiting on its guard. Outcomes are returned as
//! JSON text frames.

use axum::{
    extract::{ws::{Message, WebSocket, WebSocketUpgrade}, Query, State},
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::{collections::HashMap, sync::Arc};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    navigation::Navigator,
    services::session_manager::SessionAuth,
};

/// Per-connection navigation state shared by the frame tasks.
pub struct NavigationChannel {
    navigator: Arc<Navigator>,
    auth: Arc<SessionAuth>,
    outbox: mpsc::Sender<String>,
}

impl NavigationChannel {
    pub fn new(state: &AppState, token: Option<Uuid>, outbox: mpsc::Sender<String>) -> Self {
        Self {
            navigator: Arc::new(Navigator::new(state.resolver.clone())),
            auth: Arc::new(SessionAuth::new(state.sessions.clone(), token)),
            outbox,
        }
    }

    /// Takes the generation ticket in frame order, then resolves on its own
    /// task and queues the JSON outcome.
    pub fn dispatch(&self, path: &str) -> JoinHandle<()> {
        let ticket = self.navigator.begin();
        let path = path.trim().to_string();
        let navigator = self.navigator.clone();
        let auth = self.auth.clone();
        let outbox = self.outbox.clone();

        tokio::spawn(async move {
            let outcome = navigator.navigate_with_ticket(ticket, &path, auth.as_ref()).await;
            match serde_json::to_string(&outcome) {
                Ok(payload) => {
                    let _ = outbox.send(payload).await;
                }
                Err(e) => warn!("Failed to serialize outcome: {}", e),
            }
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }
}

/// Main entry point for the WebSocket upgrade. `?token=` selects the session.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let token = params.get("token").and_then(|t| Uuid::parse_str(t).ok());
    ws.on_upgrade(move |socket| handle_socket(socket, state, token))
}

/// Handles the WebSocket connection lifecycle and message passing.
async fn handle_socket(socket: WebSocket, state: AppState, token: Option<Uuid>) {
    let connection_id = Uuid::new_v4();
    info!("Navigation channel opened: {} (session: {:?})", connection_id, token);

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(32);
    let channel = NavigationChannel::new(&state, token, tx);

    // Worker forwarding resolved outcomes to the client.
    let sender_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_sender.send(Message::Text(payload)).await.is_err() {
                warn!("Could not send outcome to client {}.", connection_id);
                break;
            }
        }
        info!("Outcome worker stopped for client {}", connection_id);
    });

    // Receiver loop: handles navigation requests coming *from* the client
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(path)) => {
                channel.dispatch(&path);
            }
            Ok(Message::Close(c)) => {
                info!("Client {} closed connection: {:?}", connection_id, c);
                break;
            }
            Ok(_) => info!("Client {} sent non-text message.", connection_id),
            Err(e) => {
                warn!("WebSocket error for client {}: {}", connection_id, e);
                break;
            }
        }
    }

    drop(channel);
    sender_task.abort();
    info!("Navigation channel closed for client {}", connection_id);
}
