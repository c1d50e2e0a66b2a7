//! Text importers: anything that can load a batch of writings into the
//! database and report afterwards whether it went wrong.

mod file_importer;
pub mod text;

pub use file_importer::{FileTextImporter, ImportReport};

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The capability the import job depends on.
///
/// `import` returning `Err` is a hard failure that aborts the job. Problems
/// the importer can live with are recorded instead and surface through
/// `has_failed` / `last_error` once `import` has returned.
pub trait TextImporter {
    fn import(&mut self) -> Result<(), ImportError>;

    fn has_failed(&self) -> bool;

    /// Message of the most recent recorded failure, empty when none.
    fn last_error(&self) -> &str;
}
