// File Path: src/navigation/navigator.rs

//! # Navigator
//!
//! Turns a requested URL into a [`NavigationOutcome`]. [`RouteResolver`] is
//! stateless and shareable; [`Navigator`] wraps it for a single client and
//! applies last-request-wins between overlapping navigations.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::guard::{AuthGuard, AuthProvider, GuardDecision};
use super::pattern::RequestPath;
use super::table::{Role, RouteTable, ViewId};

/// Where denied or unmatched navigations are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPolicy {
    pub login_path: String,
    /// When unset, a role mismatch yields [`NavigationOutcome::Forbidden`].
    pub forbidden_redirect: Option<String>,
    /// When unset, an unmatched path yields [`NavigationOutcome::NotFound`].
    pub not_found_redirect: Option<String>,
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            forbidden_redirect: None,
            not_found_redirect: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    Unauthenticated,
    Forbidden,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Render {
        view: ViewId,
        path: String,
        params: BTreeMap<String, String>,
        query: BTreeMap<String, String>,
    },
    Redirect {
        to: String,
        return_to: Option<String>,
        reason: RedirectReason,
    },
    Forbidden {
        path: String,
        required_roles: Vec<Role>,
    },
    NotFound {
        path: String,
    },
    Superseded {
        path: String,
    },
}

impl NavigationOutcome {
    /// The view the host should show, if any. Not-found maps to its own view.
    pub fn view(&self) -> Option<ViewId> {
        match self {
            NavigationOutcome::Render { view, .. } => Some(*view),
            NavigationOutcome::NotFound { .. } => Some(ViewId::NotFound),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteResolver {
    table: Arc<RouteTable>,
    guard: AuthGuard,
    policy: NavigationPolicy,
}

impl RouteResolver {
    pub fn new(table: Arc<RouteTable>, policy: NavigationPolicy) -> Self {
        Self {
            table,
            guard: AuthGuard,
            policy,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[instrument(skip(self, auth))]
    pub async fn resolve(&self, url: &str, auth: &dyn AuthProvider) -> NavigationOutcome {
        let request = RequestPath::parse(url);
        let path = request.path();

        let Some(matched) = self.table.resolve(&request) else {
            warn!("No route matches {}", path);
            return match &self.policy.not_found_redirect {
                Some(to) => NavigationOutcome::Redirect {
                    to: to.clone(),
                    return_to: None,
                    reason: RedirectReason::NotFound,
                },
                None => NavigationOutcome::NotFound { path },
            };
        };

        match self.guard.check(&matched.entry.access, auth).await {
            GuardDecision::Allow => NavigationOutcome::Render {
                view: matched.entry.view,
                path,
                params: matched.params,
                query: request.query().clone(),
            },
            GuardDecision::Unauthenticated => {
                info!("Redirecting unauthenticated request for {} to {}", path, self.policy.login_path);
                NavigationOutcome::Redirect {
                    to: self.policy.login_path.clone(),
                    return_to: Some(path),
                    reason: RedirectReason::Unauthenticated,
                }
            }
            GuardDecision::RoleMismatch { required, actual } => {
                info!("Denied {} for role {:?}; requires {:?}", path, actual, required);
                match &self.policy.forbidden_redirect {
                    Some(to) => NavigationOutcome::Redirect {
                        to: to.clone(),
                        return_to: None,
                        reason: RedirectReason::Forbidden,
                    },
                    None => NavigationOutcome::Forbidden {
                        path,
                        required_roles: required,
                    },
                }
            }
        }
    }
}

/// Per-client navigation state.
///
/// A navigation that is still waiting on its guard when a newer one starts
/// resolves to [`NavigationOutcome::Superseded`] and leaves the location alone.
#[derive(Debug)]
pub struct Navigator {
    resolver: Arc<RouteResolver>,
    generation: AtomicU64,
    location: RwLock<Option<String>>,
}

impl Navigator {
    pub fn new(resolver: Arc<RouteResolver>) -> Self {
        Self {
            resolver,
            generation: AtomicU64::new(0),
            location: RwLock::new(None),
        }
    }

    pub async fn navigate(&self, url: &str, auth: &dyn AuthProvider) -> NavigationOutcome {
        let ticket = self.begin();
        self.navigate_with_ticket(ticket, url, auth).await
    }

    /// Reserves the next generation ticket. Callers that resolve on separate
    /// tasks must take tickets in request order, before spawning.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Resolves `url` under a ticket from [`Navigator::begin`]. Any later
    /// ticket supersedes this one.
    pub async fn navigate_with_ticket(
        &self,
        ticket: u64,
        url: &str,
        auth: &dyn AuthProvider,
    ) -> NavigationOutcome {
        let outcome = self.resolver.resolve(url, auth).await;

        // Hold the write lock across the check so a newer navigation that
        // already finished cannot be overwritten.
        let mut location = self.location.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            let path = RequestPath::parse(url).path();
            info!("Navigation to {} superseded", path);
            return NavigationOutcome::Superseded { path };
        }

        if let NavigationOutcome::Render { path, .. } = &outcome {
            *location = Some(path.clone());
        }
        outcome
    }

    /// Path of the last rendered navigation.
    pub async fn current_location(&self) -> Option<String> {
        self.location.read().await.clone()
    }
}
