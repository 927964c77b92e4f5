// File Path: src/routes/sessions.rs

//! Session Routes

use axum::{
    routing::{delete, post},
    Router,
};
use crate::api::{sessions, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/sessions/:token", delete(sessions::delete_session))
}
