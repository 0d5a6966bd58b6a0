//! HTTP server for the market data and portfolio REST API

use crate::api::handlers;
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // CORS allows all origins for local frontend development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        // Market data (public)
        .route("/market/indices", get(handlers::get_indices))
        .route("/market/movers", get(handlers::get_top_movers))
        // Portfolio (authenticated)
        .route("/holdings", post(handlers::add_holding))
        .route("/portfolio", get(handlers::get_portfolio))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve the API until shutdown
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let host = state.config.host.clone();
    let port = state.config.port;

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}:{}: {}", host, port, e)))?;

    let app = router(state);

    info!("Starting FolioTrack API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("=== Endpoints ===");
    info!("  GET  http://{}:{}/health", host, port);
    info!("  GET  http://{}:{}/market/indices", host, port);
    info!("  GET  http://{}:{}/market/movers", host, port);
    info!("  POST http://{}:{}/holdings", host, port);
    info!("  GET  http://{}:{}/portfolio", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server shut down");
    Ok(())
}

/// Resolves when the process receives a shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
