// File Path: src/routes/health.rs
//! Health Check Routes

use axum::{routing::get, Router};
use crate::api::state::AppState;

/// Returns "OK" while the server is up.
pub async fn health_check() -> &'static str {
    "OK"
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
}
