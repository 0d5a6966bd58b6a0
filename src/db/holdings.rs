//! Holdings table access

use crate::db::models::Holding;
use crate::error::Result;
use rusqlite::{Connection, Row};

fn row_to_holding(row: &Row) -> rusqlite::Result<Holding> {
    Ok(Holding {
        id: row.get(0)?,
        user_id: row.get(1)?,
        ticker: row.get(2)?,
        quantity: row.get(3)?,
        average_price: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Insert a holding and return the stored row
pub fn insert_holding(
    conn: &Connection,
    user_id: &str,
    ticker: &str,
    quantity: f64,
    average_price: f64,
) -> Result<Holding> {
    conn.execute(
        "INSERT INTO holdings (user_id, ticker, quantity, average_price) VALUES (?, ?, ?, ?)",
        rusqlite::params![user_id, ticker, quantity, average_price],
    )?;

    let id = conn.last_insert_rowid();

    let holding = conn.query_row(
        "SELECT id, user_id, ticker, quantity, average_price, created_at
         FROM holdings WHERE id = ?",
        [id],
        row_to_holding,
    )?;

    Ok(holding)
}

/// Get all holdings owned by a user, oldest first
pub fn holdings_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Holding>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, ticker, quantity, average_price, created_at
         FROM holdings WHERE user_id = ? ORDER BY id",
    )?;

    let rows = stmt.query_map([user_id], row_to_holding)?;
    let holdings = rows.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(holdings)
}
