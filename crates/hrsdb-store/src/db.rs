//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::errors::{from_rusqlite, Result};

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open a SQLite database by URI (used for named shared-cache in-memory
/// databases)
pub fn open_uri(uri: &str) -> Result<Connection> {
    Connection::open(uri).map_err(from_rusqlite)
}

/// Open a private in-memory SQLite database (for unit tests)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection with the settings every unit of work relies on
pub fn configure(conn: &Connection) -> Result<()> {
    // Foreign keys are enforced per-connection
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    // WAL for better concurrency on disk databases; the pragma returns the
    // effective mode ("memory" for in-memory databases), so query it
    let _mode: String = conn
        .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
        .map_err(from_rusqlite)?;

    conn.busy_timeout(Duration::from_secs(5))
        .map_err(from_rusqlite)?;

    Ok(())
}
