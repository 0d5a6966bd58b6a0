//! Application state management

use crate::auth::AuthClient;
use crate::config::AppConfig;
use crate::db::SqliteDb;
use crate::error::Result;
use crate::quotes::{QuoteCache, QuoteFetcher, YahooFetcher};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
pub struct AppState {
    /// Runtime configuration
    pub config: AppConfig,

    /// SQLite database connection
    pub db: Arc<SqliteDb>,

    /// Quote cache in front of the market data provider
    pub quote_cache: QuoteCache,

    /// Identity provider client
    pub auth: AuthClient,
}

impl AppState {
    /// Create new application state backed by the live quote provider
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_fetcher(config, Arc::new(YahooFetcher::new()))
    }

    /// Create application state with a specific quote fetcher
    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn QuoteFetcher>) -> Result<Self> {
        tracing::info!("Holdings database: {}", config.database_path);
        let db = Arc::new(SqliteDb::new(Path::new(&config.database_path))?);

        let quote_cache = QuoteCache::new(fetcher, Duration::from_secs(config.quote_ttl_secs));
        let auth = AuthClient::new(&config.auth_url, &config.auth_api_key);

        Ok(Self {
            config,
            db,
            quote_cache,
            auth,
        })
    }
}
