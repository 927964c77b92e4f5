//! # rental-nav
//!
//! Client navigation routes for the vacation-rental booking front end: the
//! route table, its auth guard, and an HTTP/WebSocket surface that resolves
//! paths for the UI.

pub mod api;
pub mod config;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;

pub use models::{ApiError, ApiResult};
