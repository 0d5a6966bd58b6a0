//! Environment-derived application configuration

use crate::error::{AppError, Result};

/// Server configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the API server binds to
    pub host: String,
    pub port: u16,
    /// Path of the SQLite holdings database
    pub database_path: String,
    /// Identity provider base URL (e.g. https://xyz.supabase.co)
    pub auth_url: String,
    /// Identity provider API key sent alongside token lookups
    pub auth_api_key: String,
    /// Quote cache staleness window in seconds
    pub quote_ttl_secs: u64,
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_PATH: &str = "foliotrack.db";
const DEFAULT_QUOTE_TTL_SECS: u64 = 15;

impl AppConfig {
    /// Load configuration from `FOLIO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = get("FOLIO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("FOLIO_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid FOLIO_PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let database_path =
            get("FOLIO_DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let auth_url = get("FOLIO_AUTH_URL")
            .ok_or_else(|| AppError::Config("FOLIO_AUTH_URL is not set".to_string()))?;

        let auth_api_key = get("FOLIO_AUTH_API_KEY")
            .ok_or_else(|| AppError::Config("FOLIO_AUTH_API_KEY is not set".to_string()))?;

        let quote_ttl_secs = match get("FOLIO_QUOTE_TTL_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!("Invalid FOLIO_QUOTE_TTL_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_QUOTE_TTL_SECS,
        };

        Ok(Self {
            host,
            port,
            database_path,
            auth_url,
            auth_api_key,
            quote_ttl_secs,
        })
    }
}
