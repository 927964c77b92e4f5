// src/config.rs

//! # Application Configuration
//!
//! Start-up settings read from the environment.

use std::{env, net::SocketAddr, path::PathBuf};

use crate::models::{ApiError, ApiResult};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3100";
const DEFAULT_TABLE: &str = "routes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `<table>.yaml`. `None` selects the builtin table.
    pub data_dir: Option<PathBuf>,
    pub schema_dir: Option<PathBuf>,
    pub table: String,
}

impl AppConfig {
    /// Reads `NAV_BIND_ADDR`, `NAV_DATA_DIR`, `NAV_SCHEMA_DIR` and `NAV_TABLE`.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let bind = lookup("NAV_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|e| ApiError::ConfigError(format!("NAV_BIND_ADDR '{}': {}", bind, e)))?;

        let data_dir = lookup("NAV_DATA_DIR").map(PathBuf::from);
        if data_dir.is_none() && lookup("NAV_SCHEMA_DIR").is_some() {
            return Err(ApiError::ConfigError(
                "NAV_SCHEMA_DIR is set without NAV_DATA_DIR".to_string(),
            ));
        }
        // Schemas default to a `schemas/` folder next to the data.
        let schema_dir = lookup("NAV_SCHEMA_DIR")
            .map(PathBuf::from)
            .or_else(|| data_dir.as_ref().map(|d| d.join("schemas")));

        Ok(Self {
            bind_addr,
            data_dir,
            schema_dir,
            table: lookup("NAV_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
        })
    }
}
