//! SQLite database models

use serde::{Deserialize, Serialize};

/// Holding row: one lot of an equity owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub id: i64,
    pub user_id: String,
    pub ticker: String,
    pub quantity: f64,
    pub average_price: f64,
    pub created_at: String,
}
