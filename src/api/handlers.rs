//! REST API endpoint handlers
//!
//! Market data endpoints are public; holdings and portfolio endpoints
//! require a bearer token that the identity provider can resolve to a
//! user.

use crate::api::types::{ApiResponse, Empty, NewHolding};
use crate::auth::{self, AuthUser};
use crate::db::models::Holding;
use crate::error::{AppError, Result};
use crate::services::{IndexSnapshot, MarketService, PortfolioPosition, PortfolioService, TopMovers};
use crate::state::AppState;
use axum::{
    extract::{Json, State as AxumState},
    http::header::AUTHORIZATION,
    http::HeaderMap,
};
use std::sync::Arc;

/// Health check endpoint - GET /health or GET /
pub async fn health_check() -> Json<ApiResponse<Empty>> {
    Json(ApiResponse::success_with_message("FolioTrack API is running"))
}

/// Benchmark indices - GET /market/indices
pub async fn get_indices(AxumState(state): AxumState<Arc<AppState>>) -> Json<Vec<IndexSnapshot>> {
    Json(MarketService::get_indices(&state.quote_cache).await)
}

/// Watchlist gainers and losers - GET /market/movers
pub async fn get_top_movers(AxumState(state): AxumState<Arc<AppState>>) -> Json<TopMovers> {
    Json(MarketService::get_top_movers(&state.quote_cache).await)
}

/// Resolve the caller from the Authorization header
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = auth::token_from_header(header)
        .ok_or_else(|| AppError::Auth("Missing Authorization header".to_string()))?;

    state.auth.resolve_user(token).await
}

/// Record a holding - POST /holdings
pub async fn add_holding(
    AxumState(state): AxumState<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<NewHolding>,
) -> Result<Json<Holding>> {
    let user = authenticate(&state, &headers).await?;

    let holding = PortfolioService::add_holding(
        &state,
        &user.id,
        &payload.ticker,
        payload.quantity,
        payload.average_price,
    )
    .await?;

    Ok(Json(holding))
}

/// Enriched portfolio - GET /portfolio
pub async fn get_portfolio(
    AxumState(state): AxumState<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<PortfolioPosition>>> {
    let user = authenticate(&state, &headers).await?;
    let positions = PortfolioService::get_portfolio(&state, &user.id).await?;

    Ok(Json(positions))
}
