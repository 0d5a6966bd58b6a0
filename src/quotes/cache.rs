//! Staleness-window quote cache
//!
//! Sits between the aggregation layer and the upstream fetcher: fresh
//! entries are served from memory, the stale-or-missing remainder goes
//! upstream as a single batch. A failed batch degrades to whatever is
//! fresh instead of failing the read.

use crate::quotes::{symbols, Quote, QuoteFetcher};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

struct CachedQuote {
    quote: Quote,
    fetched_at: Instant,
}

/// Time-bounded cache keyed by normalized symbol
pub struct QuoteCache {
    fetcher: Arc<dyn QuoteFetcher>,
    entries: DashMap<String, CachedQuote>,
    ttl: Duration,
}

impl QuoteCache {
    pub fn new(fetcher: Arc<dyn QuoteFetcher>, ttl: Duration) -> Self {
        Self {
            fetcher,
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Get quotes for a set of symbols, in any mix of bare and suffixed
    /// forms. Result keys are normalized symbols.
    ///
    /// Partial by design: symbols the upstream does not return, and the
    /// whole stale subset when the upstream call fails, are absent rather
    /// than an error. Entries for failed symbols are left untouched so the
    /// next read past the window retries them.
    pub async fn get_quotes(&self, requested: &[String]) -> HashMap<String, Quote> {
        let mut results = HashMap::new();
        let mut to_fetch: Vec<String> = Vec::new();

        for raw in requested {
            let symbol = symbols::normalize(raw);

            if let Some(entry) = self.entries.get(&symbol) {
                if entry.fetched_at.elapsed() < self.ttl {
                    results.insert(symbol, entry.quote.clone());
                    continue;
                }
            }

            if !to_fetch.contains(&symbol) {
                to_fetch.push(symbol);
            }
        }

        if to_fetch.is_empty() {
            return results;
        }

        debug!(
            "Quote lookup: {} fresh, {} to fetch",
            results.len(),
            to_fetch.len()
        );

        match self.fetcher.fetch_quotes(&to_fetch).await {
            Ok(fetched) => {
                for (symbol, quote) in fetched {
                    self.entries.insert(
                        symbol.clone(),
                        CachedQuote {
                            quote: quote.clone(),
                            fetched_at: Instant::now(),
                        },
                    );
                    results.insert(symbol, quote);
                }
            }
            Err(e) => {
                // Fetcher has already warned; note the degraded read and move on
                debug!("Serving {} fresh quotes after failed fetch: {}", results.len(), e);
            }
        }

        results
    }

    /// Single-symbol convenience over [`get_quotes`](Self::get_quotes)
    pub async fn get_quote(&self, symbol: &str) -> Option<Quote> {
        let normalized = symbols::normalize(symbol);
        self.get_quotes(std::slice::from_ref(&normalized))
            .await
            .remove(&normalized)
    }

    #[cfg(test)]
    fn backdate(&self, symbol: &str, age: Duration) {
        let mut entry = self
            .entries
            .get_mut(symbol)
            .expect("entry to backdate must exist");
        entry.fetched_at = Instant::now() - age;
    }
}
