//! Market quote acquisition
//!
//! Upstream access goes through the [`QuoteFetcher`] trait so the serving
//! path never depends on a concrete provider. [`cache::QuoteCache`] wraps a
//! fetcher with a staleness-window cache; [`yahoo::YahooFetcher`] is the
//! production implementation.

pub mod cache;
pub mod symbols;
pub mod yahoo;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use cache::QuoteCache;
pub use yahoo::YahooFetcher;

/// Point-in-time snapshot for one symbol
///
/// Immutable once fetched; the cache replaces entries wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub name: Option<String>,
}

/// Upstream quote provider
///
/// Implementations perform exactly one batched request per call. Symbols
/// silently dropped by the provider are simply absent from the result map;
/// a whole-call failure is an error.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>>;
}
