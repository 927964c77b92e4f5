// src/services/session_manager.rs

//! # Session Manager Service
//!
//! Tracks authenticated sessions and exposes them to the auth guard through
//! [`SessionAuth`].

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::SessionResponse;
use crate::navigation::{AuthProvider, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            token: session.token,
            role: session.role,
            created_at: session.created_at,
        }
    }
}

type SessionMap = Arc<Mutex<HashMap<Uuid, Session>>>;

#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: SessionMap,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new session for `role` and returns it.
    pub async fn create(&self, role: Role) -> Session {
        let session = Session {
            token: Uuid::new_v4(),
            role,
            created_at: Utc::now(),
        };
        self.sessions.lock().await.insert(session.token, session.clone());
        info!("Session {} opened for {:?}", session.token, role);
        session
    }

    pub async fn get(&self, token: Uuid) -> Option<Session> {
        self.sessions.lock().await.get(&token).cloned()
    }

    /// Closes a session. Returns `false` if the token was unknown.
    pub async fn remove(&self, token: Uuid) -> bool {
        let mut map = self.sessions.lock().await;
        if map.remove(&token).is_some() {
            info!("Session {} closed.", token);
            true
        } else {
            warn!("Attempted to close non-existent session: {}", token);
            false
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// [`AuthProvider`] backed by a session token. Each call looks the token up
/// again, so a session closed mid-navigation is observed.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    manager: Arc<SessionManager>,
    token: Option<Uuid>,
}

impl SessionAuth {
    pub fn new(manager: Arc<SessionManager>, token: Option<Uuid>) -> Self {
        Self { manager, token }
    }
}

#[async_trait]
impl AuthProvider for SessionAuth {
    async fn is_authenticated(&self) -> bool {
        match self.token {
            Some(token) => self.manager.get(token).await.is_some(),
            None => false,
        }
    }

    async fn current_role(&self) -> Option<Role> {
        let token = self.token?;
        self.manager.get(token).await.map(|s| s.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_get_remove() {
        let manager = SessionManager::new();
        let session = manager.create(Role::Host).await;
        assert_eq!(manager.len().await, 1);
        assert_eq!(manager.get(session.token).await, Some(session.clone()));

        assert!(manager.remove(session.token).await);
        assert!(!manager.remove(session.token).await);
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn session_auth_reflects_live_sessions() {
        let manager = Arc::new(SessionManager::new());
        let session = manager.create(Role::Guest).await;
        let auth = SessionAuth::new(manager.clone(), Some(session.token));

        assert!(auth.is_authenticated().await);
        assert_eq!(auth.current_role().await, Some(Role::Guest));

        manager.remove(session.token).await;
        assert!(!auth.is_authenticated().await);
        assert_eq!(auth.current_role().await, None);
    }

    #[tokio::test]
    async fn missing_or_unknown_token_is_anonymous() {
        let manager = Arc::new(SessionManager::new());
        assert!(!SessionAuth::new(manager.clone(), None).is_authenticated().await);
        assert!(!SessionAuth::new(manager, Some(Uuid::new_v4())).is_authenticated().await);
    }
}
