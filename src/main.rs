//! CosmoBot Engine - Dice and combat resolution for a TTRPG chat bot
//!
//! The engine:
//! - Keeps player and NPC sheets in a pluggable store
//! - Resolves attribute checks, initiative, physical attacks and special moves
//! - Tracks experience and computes the weekly master awards
//! - Accepts chat commands over HTTP so any chat transport can drive it

mod application;
mod domain;
mod infrastructure;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmobot_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CosmoBot Engine");

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Command prefix: {}", config.command_prefix);
    let addr = config.server_addr();

    // Initialize application state
    let state = AppState::new(config).await?;
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    // Build the router
    let app = Router::new()
        .route("/", get(keep_alive))
        .route("/health", get(health_check))
        // Merge REST API routes
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run until the server fails or Ctrl+C
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn keep_alive() -> &'static str {
    "CosmoBot online!"
}

async fn health_check() -> &'static str {
    "OK"
}
