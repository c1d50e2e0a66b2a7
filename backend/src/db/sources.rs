//! Queries over the `sources` table.

use common::model::source::Source;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn source_from_row(row: &Row) -> rusqlite::Result<Source> {
    Ok(Source {
        id: row.get(0)?,
        source: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

/// Every source, ordered by id.
pub fn list_sources(conn: &Connection) -> rusqlite::Result<Vec<Source>> {
    let mut stmt =
        conn.prepare("SELECT id, source, created_at, updated_at FROM sources ORDER BY id")?;
    let rows = stmt.query_map([], source_from_row)?;
    rows.collect()
}

pub fn find_source(conn: &Connection, id: i64) -> rusqlite::Result<Option<Source>> {
    conn.query_row(
        "SELECT id, source, created_at, updated_at FROM sources WHERE id = ?1",
        params![id],
        source_from_row,
    )
    .optional()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;

    fn insert_source(conn: &Connection, name: &str) -> i64 {
        conn.execute(
            "INSERT INTO sources (source, created_at, updated_at)
             VALUES (?1, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)",
            params![name],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn seeded_sources_are_listed() {
        let conn = test_connection();
        let sources = list_sources(&conn).unwrap();

        let names: Vec<&str> = sources.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(names, vec!["Irmgard", "Philipp"]);
        assert!(sources.iter().all(|s| s.created_at.is_none()));
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let conn = test_connection();
        let first = insert_source(&conn, "Irmgard");
        let second = insert_source(&conn, "Irmgard");
        assert_ne!(first, second);

        let irmgards = list_sources(&conn)
            .unwrap()
            .into_iter()
            .filter(|s| s.source == "Irmgard")
            .count();
        assert_eq!(irmgards, 3);
    }

    #[test]
    fn source_reads_back_with_timestamps() {
        let conn = test_connection();
        let id = insert_source(&conn, "Anna");
        let source = find_source(&conn, id).unwrap().unwrap();

        assert_eq!(source.source, "Anna");
        assert!(source.created_at.is_some());
        assert!(source.updated_at.is_some());
    }

    #[test]
    fn missing_source_is_none() {
        let conn = test_connection();
        assert_eq!(find_source(&conn, 999).unwrap(), None);
    }
}
