//! Services Layer
//!
//! Business logic between the REST handlers and the quote cache / holdings
//! store. Handlers stay thin; shaping and arithmetic live here.
//!
//! # Services
//!
//! - `MarketService` - index snapshot, top movers, live prices
//! - `PortfolioService` - holding creation, enriched portfolio

pub mod market_service;
pub mod portfolio_service;

// Re-export commonly used types and services
pub use market_service::{IndexSnapshot, MarketService, Mover, TopMovers};
pub use portfolio_service::{PortfolioPosition, PortfolioService};
