// src/services/mod.rs

//! # Services Module
//!
//! Route configuration loading and the session registry.

// YAML route tables validated against JSON Schema
pub mod route_config;
// Sessions backing the auth guard
pub mod session_manager;
