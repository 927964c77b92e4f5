// File Path: src/api/navigation.rs
//! Navigation API Handlers
//! Resolves requested paths against the route table on behalf of the front end.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use std::collections::HashMap;

use crate::{
    api::{sessions::bearer_token, state::AppState},
    models::{ApiError, ApiResult, RouteSummary},
    navigation::NavigationOutcome,
    services::session_manager::SessionAuth,
};

/// Lists the active route entries in declaration order.
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(state.resolver.table().summaries())
}

/// Resolves `?path=` for the caller identified by the bearer token, if any.
///
/// Guard denials come back as `redirect` / `forbidden` outcomes with status 200;
/// only a missing `path` is an error.
pub async fn navigate(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> ApiResult<Json<NavigationOutcome>> {
    let path = params
        .get("path")
        .ok_or_else(|| ApiError::BadRequest("missing 'path' query parameter".to_string()))?;

    let auth = SessionAuth::new(state.sessions.clone(), bearer_token(&headers));
    let outcome = state.resolver.resolve(path, &auth).await;

    Ok(Json(outcome))
}
