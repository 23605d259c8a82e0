//! Site Analytic Proxy
//!
//! A thin HTTP layer between the salary-grade dashboard and its Supabase
//! REST store, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────┐
//!                    │              SITE ANALYTIC                │
//!                    │                                           │
//!   Browser ─────────┼─▶ http/server ──▶ http/handlers ──▶ upstream ──▶ Supabase
//!                    │       │                                   │       REST
//!   Dashboard ◀──────┼───────┴─▶ static/ (shell + assets)        │
//!                    │                                           │
//!                    │   config (env)          error (taxonomy)  │
//!                    └──────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use site_analytic::config::AppConfig;
use site_analytic::http::HttpServer;
use site_analytic::upstream::StoreClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Environment files are optional; deployments may set variables directly.
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_analytic=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("site-analytic v0.1.0 starting");

    let config = AppConfig::from_env();

    if config.store.credentials().is_none() {
        tracing::warn!("Supabase URL or API key missing; API calls will fail until both are set");
    }

    tracing::info!(
        bind_address = %config.server.bind_address,
        static_dir = %config.server.static_dir.display(),
        table = %config.store.table,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let store = StoreClient::new(Arc::new(config.store.clone()))?;
    let server = HttpServer::new(&config.server, store);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
