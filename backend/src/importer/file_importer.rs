//! Imports a directory of `<source_id>-<id>-<page_num>.txt` files into the
//! `writings` table.
//!
//! Each file is read, cleaned, upserted by `(source_id, id)` and a cleaned
//! copy is written to the destination directory under the same name. The
//! directory is walked in file name order and the walk stops once
//! `max_files` entries have been visited. A limit of zero means no limit.
//!
//! Failing to open the source directory or to create the destination is a
//! hard error returned from [`TextImporter::import`]. A file that cannot be
//! read, stored or written only marks the import as failed; the remaining
//! files are still processed.

use super::text::{extract_metadata, TextParser};
use super::{ImportError, TextImporter};
use crate::db::writings::{upsert_writing, Upsert};
use common::model::writing::NewWriting;
use log::{debug, info, warn};
use rusqlite::Connection;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-import file counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} updated, {} skipped, {} failed",
            self.inserted, self.updated, self.skipped, self.failed
        )
    }
}

enum FileOutcome {
    Stored(Upsert),
    Skipped,
}

pub struct FileTextImporter<'c> {
    conn: &'c Connection,
    source_dir: PathBuf,
    destination_dir: PathBuf,
    max_files: Option<usize>,
    parser: TextParser,
    report: ImportReport,
    last_error: Option<String>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ImportError + '_ {
    move |source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl<'c> FileTextImporter<'c> {
    pub fn new(
        conn: &'c Connection,
        source_dir: impl Into<PathBuf>,
        destination_dir: impl Into<PathBuf>,
        max_files: Option<usize>,
    ) -> Result<Self, ImportError> {
        Ok(Self {
            conn,
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            max_files: max_files.filter(|&max| max > 0),
            parser: TextParser::new()?,
            report: ImportReport::default(),
            last_error: None,
        })
    }

    pub fn report(&self) -> ImportReport {
        self.report
    }

    fn import_file(&self, name: &str, path: &Path) -> Result<FileOutcome, ImportError> {
        if !path.is_file() {
            debug!("Skipping non-file entry {:?}", path);
            return Ok(FileOutcome::Skipped);
        }

        let Ok(key) = self.parser.parse_file_name(name) else {
            warn!("Invalid filename: {}. Skipping this file.", name);
            return Ok(FileOutcome::Skipped);
        };

        let raw = fs::read_to_string(path).map_err(io_error(path))?;
        let text = self.parser.clean(&raw);
        let metadata = extract_metadata(&text);

        let writing = NewWriting {
            id: Some(key.id),
            source_id: key.source_id,
            title: metadata.title,
            body: text,
            page_num: Some(key.page_num),
            created_date: metadata.created_date,
        };
        let stored = upsert_writing(self.conn, &writing)?;

        let cleaned = self.destination_dir.join(name);
        fs::write(&cleaned, &writing.body).map_err(io_error(&cleaned))?;
        debug!("Wrote to {:?}", cleaned);

        Ok(FileOutcome::Stored(stored))
    }

    fn record_failure(&mut self, name: &str, err: ImportError) {
        let message = format!("{}: {}", name, err);
        warn!("Import of {} failed: {}", name, err);
        self.report.failed += 1;
        self.last_error = Some(message);
    }
}

impl TextImporter for FileTextImporter<'_> {
    fn import(&mut self) -> Result<(), ImportError> {
        self.report = ImportReport::default();
        self.last_error = None;

        fs::create_dir_all(&self.destination_dir).map_err(io_error(&self.destination_dir))?;

        let mut entries = fs::read_dir(&self.source_dir)
            .and_then(|dir| dir.collect::<Result<Vec<_>, _>>())
            .map_err(io_error(&self.source_dir))?;
        entries.sort_by_key(|entry| entry.file_name());

        info!("Processing files from {:?}...", self.source_dir);
        for (count, entry) in entries.iter().enumerate() {
            if self.max_files.is_some_and(|max| count >= max) {
                info!("Reached limit of {} files", count);
                break;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            debug!("Starting: {}", name);

            match self.import_file(&name, &entry.path()) {
                Ok(FileOutcome::Stored(Upsert::Inserted(id))) => {
                    debug!("Inserted {} as writing {}", name, id);
                    self.report.inserted += 1;
                }
                Ok(FileOutcome::Stored(Upsert::Updated(id))) => {
                    debug!("Updated writing {} from {}", id, name);
                    self.report.updated += 1;
                }
                Ok(FileOutcome::Skipped) => self.report.skipped += 1,
                Err(err) => self.record_failure(&name, err),
            }
        }

        info!("Import finished: {}", self.report);
        Ok(())
    }

    fn has_failed(&self) -> bool {
        self.last_error.is_some()
    }

    fn last_error(&self) -> &str {
        self.last_error.as_deref().unwrap_or_default()
    }
}
