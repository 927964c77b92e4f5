// src/navigation/mod.rs

//! # Navigation Module
//!
//! Route table, auth guard and path resolution for the booking front end.

pub mod guard;
pub mod navigator;
pub mod pattern;
pub mod table;

pub use guard::{AuthGuard, AuthProvider, AuthSnapshot, GuardDecision};
pub use navigator::{NavigationOutcome, NavigationPolicy, Navigator, RedirectReason, RouteResolver};
pub use pattern::{PathPattern, RequestPath};
pub use table::{Access, Role, RouteEntry, RouteMatch, RouteTable, ViewId};
