// File Path: src/routes/navigation.rs

//! Navigation Routes
//!
//! Endpoints for listing the route table and resolving paths against it.

use axum::{routing::get, Router};
use crate::api::{navigation, state::AppState};

/// Creates navigation-related routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/routes", get(navigation::list_routes))
        .route("/api/navigate", get(navigation::navigate))
}
