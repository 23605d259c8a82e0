//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the API handlers
//! - Serve the dashboard shell and its static assets
//! - Wire up middleware (tracing, request timeout)
//! - Bind server to listener with graceful shutdown

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::handlers::{get_analytics, save_positions};
use crate::upstream::StoreClient;

/// Whole-request budget. Sits above the upstream exchange timeout so a
/// slow store surfaces as a 502 from the handler, not a blanket 408.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreClient,
}

/// HTTP server for the analytics proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServerConfig, store: StoreClient) -> Self {
        let state = AppState { store };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let static_dir = config.static_dir.clone();

        Router::new()
            .route("/api/save_positions", post(save_positions))
            .route("/api/analytics", get(get_analytics))
            .route_service("/", ServeFile::new(static_dir.join("index.html")))
            .nest_service("/static", ServeDir::new(&static_dir))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
