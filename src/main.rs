// src/main.rs

//! # Main Application Entry Point
//!
//! Builds the route table (builtin, or YAML when `NAV_DATA_DIR` is set),
//! then serves the navigation API.

use std::{process::ExitCode, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tokio::net::TcpListener;

use rental_nav::{
    api::state::AppState,
    config::AppConfig,
    models::RouteSettings,
    navigation::{RouteResolver, RouteTable},
    routes::create_router,
    services::{route_config::RouteConfigService, session_manager::SessionManager},
    ApiResult,
};

/// Loads the configured table, falling back to the builtin one.
async fn build_resolver(config: &AppConfig) -> ApiResult<RouteResolver> {
    let (table, settings) = match (&config.data_dir, &config.schema_dir) {
        (Some(data_dir), Some(schema_dir)) => {
            let service = RouteConfigService::new(schema_dir, data_dir).await?;
            let table_config = service.load_route_config(&config.table).await?;
            let table = RouteTable::from_config(&table_config)?;
            (table, table_config.settings.unwrap_or_default())
        }
        _ => {
            info!("NAV_DATA_DIR not set; using builtin route table");
            (RouteTable::builtin()?, RouteSettings::default())
        }
    };

    Ok(RouteResolver::new(Arc::new(table), settings.to_policy()))
}

/// The main entry point for the Tokio runtime.
#[tokio::main]
async fn main() -> ExitCode {
    // 1. Setup Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_nav=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting navigation server...");

    // 2. Configuration and shared state
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let resolver = match build_resolver(&config).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to build route table: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Serving {} routes", resolver.table().len());

    let state = AppState::new(Arc::new(resolver), Arc::new(SessionManager::new()));

    // 3. Configure Router
    let app = create_router(state);

    // 4. Configure Server Listener
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind TCP listener to {}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on http://{}", config.bind_addr);

    // 5. Run the Server
    match axum::serve(listener, app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
