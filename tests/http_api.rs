//! Drives the axum router end to end without binding a socket.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rental_nav::{
    api::state::AppState,
    navigation::{NavigationPolicy, RouteResolver, RouteTable},
    routes::create_router,
    services::session_manager::SessionManager,
};

fn app() -> Router {
    let table = RouteTable::builtin().unwrap();
    let resolver = RouteResolver::new(Arc::new(table), NavigationPolicy::default());
    create_router(AppState::new(Arc::new(resolver), Arc::new(SessionManager::new())))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn navigate(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(format!("/api/navigate?path={}", path));
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn login(app: &Router, role: &str) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/sessions")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "role": role }).to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], role);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let app = app();
    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn lists_routes_in_declaration_order() {
    let app = app();
    let (status, body) = send(&app, Request::get("/api/routes").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);

    let routes = body.as_array().unwrap();
    assert_eq!(routes[0]["path"], "login");
    assert_eq!(routes[3]["path"], "accommodation");
    assert_eq!(routes[4]["path"], "accommodation/:id");
    assert_eq!(routes[4]["view"], "accommodation-detail");
    assert_eq!(routes[7]["roles"], json!(["Host"]));
}

#[tokio::test]
async fn anonymous_profile_redirects_to_login() {
    let app = app();
    let (status, body) = send(&app, navigate("/profile", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "outcome": "redirect",
            "to": "/login",
            "return_to": "/profile",
            "reason": "unauthenticated"
        })
    );
}

#[tokio::test]
async fn accommodation_detail_extracts_id() {
    let app = app();
    let (_, body) = send(&app, navigate("/accommodation/17", None)).await;
    assert_eq!(body["outcome"], "render");
    assert_eq!(body["view"], "accommodation-detail");
    assert_eq!(body["params"]["id"], "17");

    let (_, body) = send(&app, navigate("/accommodation", None)).await;
    assert_eq!(body["view"], "accommodation-list");
}

#[tokio::test]
async fn roles_gate_host_and_guest_routes() {
    let app = app();
    let host = login(&app, "Host").await;
    let guest = login(&app, "Guest").await;

    let (_, body) = send(&app, navigate("/create-accommodation", Some(&host))).await;
    assert_eq!(body["view"], "create-accommodation");

    let (_, body) = send(&app, navigate("/create-accommodation", Some(&guest))).await;
    assert_eq!(body["outcome"], "forbidden");
    assert_eq!(body["required_roles"], json!(["Host"]));

    let (_, body) = send(&app, navigate("/reservations", Some(&guest))).await;
    assert_eq!(body["view"], "reservations");

    let (_, body) = send(&app, navigate("/profile", Some(&guest))).await;
    assert_eq!(body["view"], "profile");
}

#[tokio::test]
async fn closed_session_is_anonymous_again() {
    let app = app();
    let host = login(&app, "Host").await;

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/sessions/{}", host))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, navigate("/reports/3", Some(&host))).await;
    assert_eq!(body["outcome"], "redirect");

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/sessions/{}", host))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn unknown_path_is_not_found_outcome() {
    let app = app();
    let (status, body) = send(&app, navigate("/nowhere", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "outcome": "not_found", "path": "/nowhere" }));
}

#[tokio::test]
async fn missing_path_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, Request::get("/api/navigate").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}
