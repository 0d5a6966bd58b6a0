//! REST API surface
//!
//! Provides:
//! - Health check (/health)
//! - Market data endpoints (/market/*)
//! - Authenticated portfolio endpoints (/holdings, /portfolio)

pub mod handlers;
pub mod server;
pub mod types;

pub use server::serve;
