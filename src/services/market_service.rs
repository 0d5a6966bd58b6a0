//! Market Service
//!
//! Aggregates cached quotes into the market overview: index snapshot,
//! top movers over the watchlist, and live price lookups.

use crate::quotes::symbols::{display_symbol, INDICES, WATCHLIST};
use crate::quotes::QuoteCache;
use serde::Serialize;
use std::collections::HashMap;

/// Number of entries in each movers list
const MOVERS_PER_SIDE: usize = 5;

/// One tracked index, by display key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// One watchlist entry in a movers list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Top gainers and losers over the watchlist
#[derive(Debug, Clone, Serialize)]
pub struct TopMovers {
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
}

/// Market aggregation over the quote cache
pub struct MarketService;

impl MarketService {
    /// Snapshot of the tracked indices.
    ///
    /// Always exactly one entry per index, in table order. An index whose
    /// quote is unavailable reports zeroed fields rather than dropping out,
    /// so clients can rely on the shape.
    pub async fn get_indices(cache: &QuoteCache) -> Vec<IndexSnapshot> {
        let symbols: Vec<String> = INDICES.iter().map(|(_, s)| s.to_string()).collect();
        let quotes = cache.get_quotes(&symbols).await;

        INDICES
            .iter()
            .map(|(display, symbol)| match quotes.get(*symbol) {
                Some(q) => IndexSnapshot {
                    symbol: display.to_string(),
                    price: q.price,
                    change: q.change,
                    change_percent: q.change_percent,
                },
                None => IndexSnapshot {
                    symbol: display.to_string(),
                    price: 0.0,
                    change: 0.0,
                    change_percent: 0.0,
                },
            })
            .collect()
    }

    /// Top gainers and losers across the watchlist, ranked by percent
    /// change. Symbols without a quote are skipped; with fewer than five
    /// candidates the lists are simply shorter.
    pub async fn get_top_movers(cache: &QuoteCache) -> TopMovers {
        let symbols: Vec<String> = WATCHLIST.iter().map(|s| s.to_string()).collect();
        let quotes = cache.get_quotes(&symbols).await;

        let mut movers: Vec<Mover> = WATCHLIST
            .iter()
            .filter_map(|s| quotes.get(*s))
            .map(|q| Mover {
                symbol: display_symbol(&q.symbol),
                price: q.price,
                change: q.change,
                change_percent: q.change_percent,
                name: q.name.clone(),
            })
            .collect();

        movers.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));

        let gainers: Vec<Mover> = movers.iter().take(MOVERS_PER_SIDE).cloned().collect();
        // Losers run worst-first
        let losers: Vec<Mover> = movers.iter().rev().take(MOVERS_PER_SIDE).cloned().collect();

        TopMovers { gainers, losers }
    }

    /// Last price for one symbol, if a quote can be served
    pub async fn get_live_price(cache: &QuoteCache, symbol: &str) -> Option<f64> {
        cache.get_quote(symbol).await.map(|q| q.price)
    }

    /// Batched form of [`get_live_price`](Self::get_live_price): one cache
    /// pass for the whole set. Keys are normalized symbols.
    pub async fn get_live_prices(
        cache: &QuoteCache,
        symbols: &[String],
    ) -> HashMap<String, f64> {
        cache
            .get_quotes(symbols)
            .await
            .into_iter()
            .map(|(symbol, quote)| (symbol, quote.price))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::mock::MockFetcher;
    use std::sync::Arc;
    use std::time::Duration;

    fn cache_with(fetcher: MockFetcher) -> QuoteCache {
        QuoteCache::new(Arc::new(fetcher), Duration::from_secs(15))
    }

    #[tokio::test]
    async fn test_indices_complete_and_ordered() {
        let cache = cache_with(MockFetcher::with_quotes(&[
            ("^NSEI", 24300.0, 120.0, 0.5),
            ("^BSESN", 80100.0, 350.0, 0.44),
            ("^NSEBANK", 52200.0, -90.0, -0.17),
        ]));

        let indices = MarketService::get_indices(&cache).await;
        assert_eq!(indices.len(), 3);
        assert_eq!(indices[0].symbol, "NIFTY");
        assert_eq!(indices[1].symbol, "SENSEX");
        assert_eq!(indices[2].symbol, "BANKNIFTY");
        assert_eq!(indices[0].price, 24300.0);
        assert_eq!(indices[2].change_percent, -0.17);
    }

    #[tokio::test]
    async fn test_missing_index_reported_zeroed() {
        let cache = cache_with(MockFetcher::with_quotes(&[("^NSEI", 24300.0, 120.0, 0.5)]));

        let indices = MarketService::get_indices(&cache).await;
        assert_eq!(indices.len(), 3);
        assert_eq!(indices[1].symbol, "SENSEX");
        assert_eq!(indices[1].price, 0.0);
        assert_eq!(indices[1].change, 0.0);
        assert_eq!(indices[1].change_percent, 0.0);
        // The available index is unaffected
        assert_eq!(indices[0].price, 24300.0);
    }

    #[tokio::test]
    async fn test_movers_ranked_by_percent_change() {
        let cache = cache_with(MockFetcher::with_quotes(&[
            ("RELIANCE.NS", 2950.0, 58.0, 2.0),
            ("TCS.NS", 4100.0, -125.0, -3.0),
            ("HDFCBANK.NS", 1650.0, 8.0, 0.5),
            ("INFY.NS", 1500.0, 60.0, 4.2),
            ("ICICIBANK.NS", 1190.0, -12.0, -1.0),
            ("SBIN.NS", 830.0, 9.0, 1.1),
            ("TATAMOTORS.NS", 980.0, -49.0, -4.8),
        ]));

        let movers = MarketService::get_top_movers(&cache).await;

        let gainer_symbols: Vec<&str> =
            movers.gainers.iter().map(|m| m.symbol.as_str()).collect();
        assert_eq!(
            gainer_symbols,
            vec!["INFY", "RELIANCE", "SBIN", "HDFCBANK", "ICICIBANK"]
        );

        let loser_symbols: Vec<&str> = movers.losers.iter().map(|m| m.symbol.as_str()).collect();
        assert_eq!(
            loser_symbols,
            vec!["TATAMOTORS", "TCS", "ICICIBANK", "HDFCBANK", "SBIN"]
        );

        // Display symbols carry no market suffix
        assert!(movers.gainers.iter().all(|m| !m.symbol.ends_with(".NS")));
    }

    #[tokio::test]
    async fn test_movers_shorter_lists_when_few_quotes() {
        let cache = cache_with(MockFetcher::with_quotes(&[
            ("RELIANCE.NS", 2950.0, 58.0, 2.0),
            ("TCS.NS", 4100.0, -125.0, -3.0),
            ("SBIN.NS", 830.0, 9.0, 1.1),
        ]));

        let movers = MarketService::get_top_movers(&cache).await;
        assert_eq!(movers.gainers.len(), 3);
        assert_eq!(movers.losers.len(), 3);
        assert_eq!(movers.gainers[0].symbol, "RELIANCE");
        assert_eq!(movers.losers[0].symbol, "TCS");
    }

    #[tokio::test]
    async fn test_movers_skip_unquoted_watchlist_symbols() {
        // 14 of 15 watchlist symbols respond; TITAN.NS is silently missing
        let entries: Vec<(&str, f64, f64, f64)> = WATCHLIST
            .iter()
            .filter(|s| **s != "TITAN.NS")
            .enumerate()
            .map(|(i, s)| (*s, 100.0 + i as f64, 1.0, i as f64 - 7.0))
            .collect();
        let cache = cache_with(MockFetcher::with_quotes(&entries));

        let movers = MarketService::get_top_movers(&cache).await;
        assert_eq!(movers.gainers.len(), 5);
        assert_eq!(movers.losers.len(), 5);
        assert!(movers.gainers.iter().all(|m| m.symbol != "TITAN"));
        assert!(movers.losers.iter().all(|m| m.symbol != "TITAN"));
    }

    #[tokio::test]
    async fn test_live_price_normalizes_symbol() {
        let cache = cache_with(MockFetcher::with_quotes(&[("RELIANCE.NS", 2950.0, 58.0, 2.0)]));

        assert_eq!(
            MarketService::get_live_price(&cache, "RELIANCE").await,
            Some(2950.0)
        );
        assert_eq!(
            MarketService::get_live_price(&cache, "RELIANCE.NS").await,
            Some(2950.0)
        );
        assert_eq!(MarketService::get_live_price(&cache, "UNKNOWN").await, None);
    }

    #[tokio::test]
    async fn test_live_prices_batch() {
        let cache = cache_with(MockFetcher::with_quotes(&[
            ("RELIANCE.NS", 2950.0, 58.0, 2.0),
            ("TCS.NS", 4100.0, -125.0, -3.0),
        ]));

        let prices = MarketService::get_live_prices(
            &cache,
            &["RELIANCE".to_string(), "TCS".to_string(), "MISSING".to_string()],
        )
        .await;

        assert_eq!(prices.len(), 2);
        assert_eq!(prices["RELIANCE.NS"], 2950.0);
        assert_eq!(prices["TCS.NS"], 4100.0);
    }

    #[tokio::test]
    async fn test_wire_shape_uses_camel_case() {
        let snapshot = IndexSnapshot {
            symbol: "NIFTY".to_string(),
            price: 24300.0,
            change: 120.0,
            change_percent: 0.5,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("changePercent").is_some());
        assert!(json.get("change_percent").is_none());

        let mover = Mover {
            symbol: "INFY".to_string(),
            price: 1500.0,
            change: 60.0,
            change_percent: 4.2,
            name: None,
        };
        let json = serde_json::to_value(&mover).unwrap();
        // Unnamed movers omit the field entirely
        assert!(json.get("name").is_none());
    }
}
