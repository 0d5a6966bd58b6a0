//! Symbol normalization and fixed symbol universes

/// Market suffix appended to bare NSE tickers
pub const NSE_SUFFIX: &str = ".NS";

/// Tracked indices: display key -> upstream symbol, in presentation order
pub const INDICES: &[(&str, &str)] = &[
    ("NIFTY", "^NSEI"),
    ("SENSEX", "^BSESN"),
    ("BANKNIFTY", "^NSEBANK"),
];

/// Equity universe over which top movers are computed
pub const WATCHLIST: &[&str] = &[
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "INFY.NS",
    "ICICIBANK.NS",
    "SBIN.NS",
    "TATAMOTORS.NS",
    "ITC.NS",
    "AXISBANK.NS",
    "LT.NS",
    "BAJFINANCE.NS",
    "MARUTI.NS",
    "ASIANPAINT.NS",
    "HCLTECH.NS",
    "TITAN.NS",
];

/// Index symbols carry a caret prefix and are exempt from suffixing
pub fn is_index(symbol: &str) -> bool {
    symbol.starts_with('^')
}

/// Canonical upstream form of a ticker: bare equity symbols get the NSE
/// suffix, already-suffixed symbols and indices pass through unchanged.
/// Idempotent.
pub fn normalize(symbol: &str) -> String {
    if is_index(symbol) || symbol.ends_with(NSE_SUFFIX) {
        symbol.to_string()
    } else {
        format!("{}{}", symbol, NSE_SUFFIX)
    }
}

/// Presentation form: the NSE suffix is stripped, anything else unchanged
pub fn display_symbol(symbol: &str) -> String {
    symbol
        .strip_suffix(NSE_SUFFIX)
        .unwrap_or(symbol)
        .to_string()
}
