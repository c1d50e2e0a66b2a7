//! Schema migrations for the `sources` and `writings` tables.
//!
//! Progress is tracked in `PRAGMA user_version`: a database at version `n`
//! has every migration with `version <= n` applied. Each migration runs in
//! its own transaction together with the version bump, so a failing
//! migration leaves the schema at the previous version.

use log::info;
use rusqlite::{params, Connection};

/// Names inserted into `sources` when the table is created.
pub const SEED_SOURCES: &[&str] = &["Irmgard", "Philipp"];

pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    up: fn(&Connection) -> rusqlite::Result<()>,
    down: fn(&Connection) -> rusqlite::Result<()>,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "2022_12_27_183000_create_sources_table",
        up: create_sources_table,
        down: drop_sources_table,
    },
    Migration {
        version: 2,
        name: "2022_12_27_183001_create_writings_table",
        up: create_writings_table,
        down: drop_writings_table,
    },
];

/// Creates `sources` and inserts the seed rows. Seeded rows carry no
/// timestamps. `source` is deliberately not unique.
pub fn create_sources_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE sources (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            source     VARCHAR(255) NOT NULL,
            created_at DATETIME NULL,
            updated_at DATETIME NULL
        );",
    )?;

    let mut stmt = conn.prepare("INSERT INTO sources (source) VALUES (?1)")?;
    for name in SEED_SOURCES {
        stmt.execute(params![name])?;
    }
    Ok(())
}

fn drop_sources_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("DROP TABLE sources;")
}

/// Creates `writings`. `source_id` has no REFERENCES clause: rows pointing at
/// a missing source are accepted.
pub fn create_writings_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE writings (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            source_id    INTEGER NOT NULL,
            title        VARCHAR(255) NULL,
            body         TEXT NOT NULL,
            page_num     INTEGER NULL,
            created_date DATE NULL,
            created_at   DATETIME NULL,
            updated_at   DATETIME NULL
        );",
    )
}

fn drop_writings_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("DROP TABLE writings;")
}

pub fn current_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Applies every migration newer than the stored version, oldest first.
/// Returns the names of the migrations that ran.
pub fn run_pending(conn: &mut Connection) -> rusqlite::Result<Vec<&'static str>> {
    let current = current_version(conn)?;
    let mut applied = Vec::new();

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.transaction()?;
        (migration.up)(&tx)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        tx.commit()?;

        info!("Migrated: {}", migration.name);
        applied.push(migration.name);
    }

    Ok(applied)
}

/// Reverts the last `steps` applied migrations, newest first.
/// Returns the names of the migrations that were rolled back.
pub fn rollback(conn: &mut Connection, steps: usize) -> rusqlite::Result<Vec<&'static str>> {
    let current = current_version(conn)?;
    let mut reverted = Vec::new();

    let applied = MIGRATIONS
        .iter()
        .rev()
        .filter(|m| m.version <= current)
        .take(steps);

    for migration in applied {
        let previous = MIGRATIONS
            .iter()
            .filter(|m| m.version < migration.version)
            .map(|m| m.version)
            .max()
            .unwrap_or(0);

        let tx = conn.transaction()?;
        (migration.down)(&tx)?;
        tx.pragma_update(None, "user_version", previous)?;
        tx.commit()?;

        info!("Rolled back: {}", migration.name);
        reverted.push(migration.name);
    }

    Ok(reverted)
}
