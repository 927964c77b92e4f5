// src/routes/mod.rs

//! # Routes Module
//!
//! Defines the main routing structure for the Axum server.

use axum::{routing::get, Router};
use crate::api::state::AppState;

pub mod health;
pub mod navigation;
pub mod sessions;
pub mod websocket;

/// Creates and configures the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(navigation::routes())
        .merge(sessions::routes())
        // Interactive navigation channel, one Navigator per socket.
        .route("/ws", get(websocket::websocket_handler))
        .with_state(state)
}
