// File Path: src/models/mod.rs

// =========================================================================================
// SECTION 1: IMPORTS
// =========================================================================================

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::navigation::{NavigationPolicy, Role, ViewId};

// =========================================================================================
// SECTION 2: API ERROR HANDLING
// =========================================================================================

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("YAML parsing error: {0}")]
    YamlParseError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::YamlParseError(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::FileNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
            ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = serde_json::json!({
            "error": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

// =========================================================================================
// SECTION 3: ROUTE CONFIGURATION MODELS
// =========================================================================================

/// Guard kinds a YAML route entry may name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardKind {
    #[default]
    None,
    Auth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTableConfig {
    pub routes: Vec<RouteEntryConfig>,
    #[serde(default)]
    pub settings: Option<RouteSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntryConfig {
    pub path: String,
    pub view: ViewId,
    #[serde(default)]
    pub guard: GuardKind,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteSettings {
    pub login_path: Option<String>,
    pub forbidden_redirect: Option<String>,
    pub not_found_redirect: Option<String>,
}

impl RouteSettings {
    /// Overlays the configured values on the default policy.
    pub fn to_policy(&self) -> NavigationPolicy {
        let defaults = NavigationPolicy::default();
        NavigationPolicy {
            login_path: self.login_path.clone().unwrap_or(defaults.login_path),
            forbidden_redirect: self.forbidden_redirect.clone(),
            not_found_redirect: self.not_found_redirect.clone(),
        }
    }
}

// =========================================================================================
// SECTION 4: API MODELS
// =========================================================================================

/// One row of `GET /api/routes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    pub path: String,
    pub view: ViewId,
    pub guarded: bool,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
