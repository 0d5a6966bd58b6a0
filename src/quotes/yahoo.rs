//! Yahoo Finance quote fetcher

use crate::error::{AppError, Result};
use crate::quotes::{Quote, QuoteFetcher};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

// Yahoo rejects requests without a browser-like User-Agent
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: QuoteResponseBody,
}

#[derive(Debug, Deserialize)]
struct QuoteResponseBody {
    result: Option<Vec<QuoteRow>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRow {
    symbol: String,
    regular_market_price: Option<f64>,
    #[serde(default)]
    regular_market_change: Option<f64>,
    #[serde(default)]
    regular_market_change_percent: Option<f64>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
}

/// Quote fetcher backed by the Yahoo Finance v7 batch quote endpoint
pub struct YahooFetcher {
    client: Client,
}

impl YahooFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    async fn fetch_batch(&self, symbols: &[String]) -> Result<HashMap<String, Quote>> {
        // One batched request for the whole symbol set
        let symbols_param = symbols.join(",");
        let encoded_symbols = urlencoding::encode(&symbols_param);

        let response = self
            .client
            .get(format!("{}?symbols={}", BASE_URL, encoded_symbols))
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Quote request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!(
                "Quote request returned {}",
                status
            )));
        }

        let envelope: QuoteEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("Invalid quote response: {}", e)))?;

        if let Some(error) = envelope.quote_response.error {
            return Err(AppError::Fetch(format!("Provider error: {}", error)));
        }

        let rows = envelope.quote_response.result.unwrap_or_default();
        debug!("Fetched {} of {} requested quotes", rows.len(), symbols.len());

        let mut quotes = HashMap::new();
        for row in rows {
            // Rows without a price are useless downstream; skip them
            let Some(price) = row.regular_market_price else {
                continue;
            };

            quotes.insert(
                row.symbol.clone(),
                Quote {
                    symbol: row.symbol,
                    price,
                    change: row.regular_market_change.unwrap_or(0.0),
                    change_percent: row.regular_market_change_percent.unwrap_or(0.0),
                    name: row.short_name.or(row.long_name),
                },
            );
        }

        Ok(quotes)
    }
}

impl Default for YahooFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteFetcher for YahooFetcher {
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }

        match self.fetch_batch(symbols).await {
            Ok(quotes) => Ok(quotes),
            Err(e) => {
                warn!("Failed to fetch {} quotes: {}", symbols.len(), e);
                Err(e)
            }
        }
    }
}
