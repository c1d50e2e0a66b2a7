//! Queries over the `writings` table.
//!
//! A writing is identified by `(source_id, id)` during imports: re-importing a
//! file updates the row in place instead of adding a second one.

use common::model::writing::{NewWriting, Writing};
use log::trace;
use rusqlite::{params, Connection, OptionalExtension, Row};

const WRITING_COLUMNS: &str =
    "id, source_id, title, body, page_num, created_date, created_at, updated_at";

/// Result of [`upsert_writing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(i64),
    Updated(i64),
}

fn writing_from_row(row: &Row) -> rusqlite::Result<Writing> {
    Ok(Writing {
        id: row.get(0)?,
        source_id: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        page_num: row.get(4)?,
        created_date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

pub fn find_writing(conn: &Connection, id: i64) -> rusqlite::Result<Option<Writing>> {
    conn.query_row(
        &format!("SELECT {WRITING_COLUMNS} FROM writings WHERE id = ?1"),
        params![id],
        writing_from_row,
    )
    .optional()
}

/// Writings of one source ordered by `page_num`, then `id`.
pub fn writings_for_source(conn: &Connection, source_id: i64) -> rusqlite::Result<Vec<Writing>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WRITING_COLUMNS} FROM writings WHERE source_id = ?1 ORDER BY page_num, id"
    ))?;
    let rows = stmt.query_map(params![source_id], writing_from_row)?;
    rows.collect()
}

pub fn writing_exists(conn: &Connection, source_id: i64, id: i64) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM writings WHERE source_id = ?1 AND id = ?2",
        params![source_id, id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Inserts a writing and returns its id. The source is not checked.
pub fn insert_writing(conn: &Connection, writing: &NewWriting) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO writings
            (id, source_id, title, body, page_num, created_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)",
        params![
            writing.id,
            writing.source_id,
            writing.title,
            writing.body,
            writing.page_num,
            writing.created_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Rewrites the content of the row matching `(source_id, id)`.
/// Returns the number of rows changed.
pub fn update_writing(conn: &Connection, id: i64, writing: &NewWriting) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE writings
         SET title = ?1, body = ?2, page_num = ?3, created_date = ?4,
             updated_at = CURRENT_TIMESTAMP
         WHERE source_id = ?5 AND id = ?6",
        params![
            writing.title,
            writing.body,
            writing.page_num,
            writing.created_date,
            writing.source_id,
            id,
        ],
    )
}

/// Updates the row matching `(source_id, id)` when it exists, inserts otherwise.
pub fn upsert_writing(conn: &Connection, writing: &NewWriting) -> rusqlite::Result<Upsert> {
    if let Some(id) = writing.id {
        if writing_exists(conn, writing.source_id, id)? {
            trace!("DB: updating writing {}/{}", writing.source_id, id);
            update_writing(conn, id, writing)?;
            return Ok(Upsert::Updated(id));
        }
    }

    trace!("DB: inserting writing for source {}", writing.source_id);
    insert_writing(conn, writing).map(Upsert::Inserted)
}
