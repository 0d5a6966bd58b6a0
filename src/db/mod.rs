//! SQLite database module
//!
//! The holdings store is intentionally narrow: insert a row, list rows by
//! owner. Everything else the API needs is derived at read time.

pub mod models;

mod holdings;
mod migrations;

use crate::error::Result;
use models::Holding;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

/// SQLite database wrapper
pub struct SqliteDb {
    conn: Mutex<Connection>,
}

impl SqliteDb {
    /// Create new SQLite database connection
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        // Run migrations
        db.run_migrations()?;

        Ok(db)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock();
        migrations::run_migrations(&conn)
    }

    // ========== Holdings Methods ==========

    /// Insert a holding for a user and return the stored row
    pub fn insert_holding(
        &self,
        user_id: &str,
        ticker: &str,
        quantity: f64,
        average_price: f64,
    ) -> Result<Holding> {
        let conn = self.conn.lock();
        holdings::insert_holding(&conn, user_id, ticker, quantity, average_price)
    }

    /// Get all holdings owned by a user
    pub fn holdings_for_user(&self, user_id: &str) -> Result<Vec<Holding>> {
        let conn = self.conn.lock();
        holdings::holdings_for_user(&conn, user_id)
    }
}
