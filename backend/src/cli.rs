//! Command line entry points besides the HTTP server.

use crate::config::Config;
use crate::db;
use crate::importer::{FileTextImporter, ImportReport};
use crate::job_controller::reporter::LogReporter;
use crate::jobs::ProcessTextsJob;
use log::info;
use rusqlite::Connection;
use std::error::Error;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Imports text pages into the writings database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending migrations and exit
    Migrate,

    /// Revert the most recent migrations
    Rollback {
        /// Number of migrations to revert
        #[arg(short, long, value_name = "STEPS", default_value_t = 1)]
        steps: usize,
    },

    /// Run one import in the foreground
    Import {
        /// Maximum number of files to visit, overrides the environment limit
        #[arg(short = 'n', long, value_name = "FILES")]
        max_files: Option<usize>,
    },
}

pub fn migrate(config: &Config) -> Result<(), Box<dyn Error>> {
    db::open_and_migrate(&config.database.path)?;
    Ok(())
}

pub fn rollback(config: &Config, steps: usize) -> Result<(), Box<dyn Error>> {
    let mut conn = Connection::open(&config.database.path)?;
    let reverted = db::migrations::rollback(&mut conn, steps)?;
    if reverted.is_empty() {
        info!("Nothing to roll back");
    }
    Ok(())
}

/// Runs [`ProcessTextsJob`] on the current thread, logging its progress.
pub fn import(config: &Config, max_files: Option<usize>) -> Result<ImportReport, Box<dyn Error>> {
    let conn = db::open_and_migrate(&config.database.path)?;
    let max_files = max_files.or(config.environment.max_files());

    let mut importer = FileTextImporter::new(
        &conn,
        &config.folders.source,
        &config.folders.destination,
        max_files,
    )?;
    let mut reporter = LogReporter::default();

    ProcessTextsJob.handle(&mut importer, &mut reporter)?;

    match reporter.failure() {
        Some(reason) => Err(format!("import failed: {}", reason).into()),
        None => {
            let report = importer.report();
            info!("Import complete! {}", report);
            Ok(report)
        }
    }
}
