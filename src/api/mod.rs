// src/api/mod.rs

//! # API Module
//!
//! Request handlers and the state they share.

pub mod navigation;
pub mod sessions;
pub mod state;
