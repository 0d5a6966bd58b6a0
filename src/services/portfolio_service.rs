//! Portfolio Service
//!
//! Holding creation and the enriched portfolio view: stored rows joined
//! with live prices into unrealized P&L.

use crate::db::models::Holding;
use crate::error::{AppError, Result};
use crate::quotes::symbols;
use crate::services::MarketService;
use crate::state::AppState;
use serde::Serialize;
use tracing::{debug, info};

/// A holding enriched with its live valuation
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPosition {
    #[serde(flatten)]
    pub holding: Holding,
    pub live_price: f64,
    pub current_value: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
}

impl PortfolioPosition {
    fn new(holding: Holding, live_price: f64) -> Self {
        let current_value = live_price * holding.quantity;
        let pnl = (live_price - holding.average_price) * holding.quantity;
        let pnl_percent = (live_price - holding.average_price) / holding.average_price * 100.0;

        Self {
            holding,
            live_price,
            current_value,
            pnl,
            pnl_percent,
        }
    }
}

/// Portfolio service for business logic
pub struct PortfolioService;

impl PortfolioService {
    /// Record a new holding for a user and return the stored row
    pub async fn add_holding(
        state: &AppState,
        user_id: &str,
        ticker: &str,
        quantity: f64,
        average_price: f64,
    ) -> Result<Holding> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(AppError::Validation("ticker must not be empty".to_string()));
        }
        if quantity <= 0.0 {
            return Err(AppError::Validation(
                "quantity must be positive".to_string(),
            ));
        }
        if average_price <= 0.0 {
            return Err(AppError::Validation(
                "average_price must be positive".to_string(),
            ));
        }

        info!("Adding holding {} x{} for user {}", ticker, quantity, user_id);
        state
            .db
            .insert_holding(user_id, ticker, quantity, average_price)
    }

    /// All of a user's holdings, enriched with live valuations.
    ///
    /// Prices for the whole portfolio are resolved in one batched cache
    /// pass. A holding whose price cannot be served right now is dropped
    /// from the result rather than reported with made-up numbers.
    pub async fn get_portfolio(state: &AppState, user_id: &str) -> Result<Vec<PortfolioPosition>> {
        let holdings = state.db.holdings_for_user(user_id)?;
        if holdings.is_empty() {
            return Ok(Vec::new());
        }

        let tickers: Vec<String> = holdings.iter().map(|h| h.ticker.clone()).collect();
        let prices = MarketService::get_live_prices(&state.quote_cache, &tickers).await;

        let positions: Vec<PortfolioPosition> = holdings
            .into_iter()
            .filter_map(|holding| {
                let live_price = *prices.get(&symbols::normalize(&holding.ticker))?;
                Some(PortfolioPosition::new(holding, live_price))
            })
            .collect();

        debug!(
            "Enriched {} of {} holdings for user {}",
            positions.len(),
            tickers.len(),
            user_id
        );

        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::quotes::mock::MockFetcher;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_state(dir: &TempDir, fetcher: Arc<MockFetcher>) -> AppState {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_path: dir.path().join("test.db").to_string_lossy().into_owned(),
            auth_url: "http://127.0.0.1:9".to_string(),
            auth_api_key: "test-key".to_string(),
            quote_ttl_secs: 15,
        };
        AppState::with_fetcher(config, fetcher).unwrap()
    }

    #[tokio::test]
    async fn test_portfolio_enrichment_math() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(MockFetcher::with_quotes(&[("RELIANCE.NS", 2950.0, 58.0, 2.0)]));
        let state = test_state(&dir, fetcher);

        PortfolioService::add_holding(&state, "user-1", "RELIANCE.NS", 10.0, 2800.0)
            .await
            .unwrap();

        let portfolio = PortfolioService::get_portfolio(&state, "user-1").await.unwrap();
        assert_eq!(portfolio.len(), 1);

        let position = &portfolio[0];
        assert_eq!(position.live_price, 2950.0);
        assert_eq!(position.current_value, 29500.0);
        assert_eq!(position.pnl, 1500.0);
        assert!((position.pnl_percent - (150.0 / 2800.0) * 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unpriced_holdings_dropped() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(MockFetcher::with_quotes(&[("TCS.NS", 4100.0, -125.0, -3.0)]));
        let state = test_state(&dir, fetcher);

        PortfolioService::add_holding(&state, "user-1", "TCS.NS", 2.0, 4000.0)
            .await
            .unwrap();
        PortfolioService::add_holding(&state, "user-1", "DELISTED.NS", 7.0, 50.0)
            .await
            .unwrap();

        let portfolio = PortfolioService::get_portfolio(&state, "user-1").await.unwrap();
        assert_eq!(portfolio.len(), 1);
        assert_eq!(portfolio[0].holding.ticker, "TCS.NS");
    }

    #[tokio::test]
    async fn test_bare_ticker_priced_via_normalization() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(MockFetcher::with_quotes(&[("INFY.NS", 1500.0, 60.0, 4.2)]));
        let state = test_state(&dir, fetcher);

        // Stored as the client sent it; priced in normalized form
        PortfolioService::add_holding(&state, "user-1", "INFY", 4.0, 1400.0)
            .await
            .unwrap();

        let portfolio = PortfolioService::get_portfolio(&state, "user-1").await.unwrap();
        assert_eq!(portfolio.len(), 1);
        assert_eq!(portfolio[0].holding.ticker, "INFY");
        assert_eq!(portfolio[0].live_price, 1500.0);
    }

    #[tokio::test]
    async fn test_portfolio_priced_in_one_batch() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(MockFetcher::with_quotes(&[
            ("RELIANCE.NS", 2950.0, 58.0, 2.0),
            ("TCS.NS", 4100.0, -125.0, -3.0),
            ("SBIN.NS", 830.0, 9.0, 1.1),
        ]));
        let state = test_state(&dir, fetcher.clone());

        for (ticker, qty, avg) in [("RELIANCE", 1.0, 2800.0), ("TCS", 2.0, 4000.0), ("SBIN", 3.0, 700.0)] {
            PortfolioService::add_holding(&state, "user-1", ticker, qty, avg)
                .await
                .unwrap();
        }

        let portfolio = PortfolioService::get_portfolio(&state, "user-1").await.unwrap();
        assert_eq!(portfolio.len(), 3);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_portfolio_skips_pricing() {
        let dir = TempDir::new().unwrap();
        let fetcher = Arc::new(MockFetcher::new());
        let state = test_state(&dir, fetcher.clone());

        let portfolio = PortfolioService::get_portfolio(&state, "user-1").await.unwrap();
        assert!(portfolio.is_empty());
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_holding_validation() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, Arc::new(MockFetcher::new()));

        let result = PortfolioService::add_holding(&state, "user-1", "  ", 1.0, 100.0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = PortfolioService::add_holding(&state, "user-1", "TCS", 0.0, 100.0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = PortfolioService::add_holding(&state, "user-1", "TCS", 1.0, -5.0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert!(state.db.holdings_for_user("user-1").unwrap().is_empty());
    }

    #[test]
    fn test_position_wire_shape_is_flat() {
        let position = PortfolioPosition::new(
            Holding {
                id: 1,
                user_id: "user-1".to_string(),
                ticker: "ITC.NS".to_string(),
                quantity: 100.0,
                average_price: 440.0,
                created_at: "2026-08-20 09:15:00".to_string(),
            },
            465.0,
        );

        let json = serde_json::to_value(&position).unwrap();
        // Holding fields sit alongside the enrichment, not nested
        assert_eq!(json["ticker"], "ITC.NS");
        assert_eq!(json["live_price"], 465.0);
        assert_eq!(json["current_value"], 46500.0);
        assert_eq!(json["pnl"], 2500.0);
        assert!(json.get("holding").is_none());
    }
}
