//! SQLite persistence for sources and writings.
//!
//! Connections are short-lived: HTTP handlers and import jobs each open their
//! own connection to the configured database file and drop it when done.

pub mod migrations;
pub mod sources;
pub mod writings;

use log::info;
use rusqlite::Connection;
use std::path::Path;

/// Opens the database file and brings the schema up to date.
pub fn open_and_migrate(path: &Path) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open(path)?;
    let applied = migrations::run_pending(&mut conn)?;
    if applied.is_empty() {
        info!("Database {:?} schema is up to date", path);
    } else {
        info!("Applied migrations on {:?}: {}", path, applied.join(", "));
    }
    Ok(conn)
}

#[cfg(test)]
pub(crate) fn test_connection() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    migrations::run_pending(&mut conn).unwrap();
    conn
}
