// src/api/state.rs

//! # Application State
//!
//! Defines the shared state that will be accessible by all route handlers.

use std::sync::Arc;

use crate::navigation::RouteResolver;
use crate::services::session_manager::SessionManager;

/// The core application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    // Read-only route table plus redirect policy, built once at start-up.
    pub resolver: Arc<RouteResolver>,
    // Sessions consulted by the auth guard.
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Creates a new instance of the application state.
    pub fn new(resolver: Arc<RouteResolver>, sessions: Arc<SessionManager>) -> Self {
        AppState { resolver, sessions }
    }
}
