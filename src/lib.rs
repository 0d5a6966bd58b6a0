//! FolioTrack - Equity Portfolio Tracker Backend
//!
//! A REST backend for tracking Indian equity portfolios: live NSE market
//! data (benchmark indices, watchlist movers) served through a short-TTL
//! quote cache, plus per-user holdings enriched with unrealized P&L.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod quotes;
pub mod services;
pub mod state;

use crate::config::AppConfig;
use crate::error::Result;
use crate::state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize and run the application
pub async fn run() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foliotrack=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FolioTrack...");

    let config = AppConfig::from_env()?;
    let state = Arc::new(AppState::new(config)?);

    tracing::info!("Application state initialized");

    api::serve(state).await
}
