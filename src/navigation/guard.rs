// File Path: src/navigation/guard.rs

//! # Auth Guard
//!
//! Authentication and role gating for protected entries. The authentication
//! state is read through an injected [`AuthProvider`], never from globals.

use async_trait::async_trait;
use tracing::debug;

use super::table::{Access, Role};

/// Source of the requester's authentication state.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn is_authenticated(&self) -> bool;

    async fn current_role(&self) -> Option<Role>;
}

/// Fixed authentication state, for callers that already know the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSnapshot {
    Anonymous,
    Authenticated(Option<Role>),
}

#[async_trait]
impl AuthProvider for AuthSnapshot {
    async fn is_authenticated(&self) -> bool {
        matches!(self, AuthSnapshot::Authenticated(_))
    }

    async fn current_role(&self) -> Option<Role> {
        match self {
            AuthSnapshot::Anonymous => None,
            AuthSnapshot::Authenticated(role) => *role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Unauthenticated,
    RoleMismatch {
        required: Vec<Role>,
        actual: Option<Role>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGuard;

impl AuthGuard {
    pub async fn check(&self, access: &Access, auth: &dyn AuthProvider) -> GuardDecision {
        let roles = match access {
            Access::Public => return GuardDecision::Allow,
            Access::Authenticated { roles } => roles,
        };

        if !auth.is_authenticated().await {
            debug!("Guard: no authenticated session");
            return GuardDecision::Unauthenticated;
        }

        if roles.is_empty() {
            return GuardDecision::Allow;
        }

        let actual = auth.current_role().await;
        match actual {
            Some(role) if roles.contains(&role) => GuardDecision::Allow,
            _ => {
                debug!("Guard: role {:?} not in {:?}", actual, roles);
                GuardDecision::RoleMismatch {
                    required: roles.clone(),
                    actual,
                }
            }
        }
    }
}
