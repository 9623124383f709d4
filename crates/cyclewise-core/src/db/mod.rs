//! SQLite persistence.
//!
//! Each table family gets its own `impl Database` block:
//! profiles, daily logs, the grocery catalog (FTS5) and grocery lists.

mod groceries;
mod grocery_lists;
mod logs;
mod profiles;
mod schema;

pub use schema::SCHEMA;

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;
use tracing::debug;

/// Storage-layer failures.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A JSON column (string array or rating table) failed to round-trip
    #[error("JSON column error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// Input rejected before it reached SQLite, or an unknown stored tag
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Single-connection SQLite store for profiles, logs, the catalog and lists.
///
/// The schema is applied on every open; all statements are idempotent.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::with_schema(Connection::open(path)?)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::with_schema(Connection::open_in_memory()?)
    }

    fn with_schema(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(SCHEMA)?;
        debug!("schema applied");
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Parse a stored string tag into one of the domain enums.
fn parse_tag<T>(tag: &str) -> DbResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    tag.parse().map_err(DbError::Constraint)
}

/// Parse a stored `YYYY-MM-DD` date.
fn parse_stored_date(s: &str) -> DbResult<chrono::NaiveDate> {
    Ok(chrono::NaiveDate::parse_from_str(s, crate::models::DATE_FORMAT)?)
}
