//! # Import Job Start Service
//!
//! Provides `POST /api/imports/start`, which runs [`ProcessTextsJob`] over the
//! configured source folder in the background.
//!
//! ## Workflow:
//!
//! 1.  **Job Scheduling**: `schedule_import_job` registers a new `job_id` as
//!     `Pending`, returns it to the client straight away and spawns a Tokio task
//!     to manage the job's lifecycle.
//!
//! 2.  **Background Processing**: the task hands `run_import_blocking` to
//!     `tokio::task::spawn_blocking`, since the import does synchronous file
//!     and SQLite I/O.
//!
//! 3.  **Progress Reporting**: the job talks to the central `job_controller`
//!     through a `ChannelReporter`: `InProgress(0)` when it starts,
//!     `InProgress(50)` once the importer returns and `Failed(reason)` if the
//!     importer recorded a failure.
//!
//! 4.  **Completion**: when the job returns without reporting a failure the
//!     task publishes `Completed` with the import counters. A hard importer
//!     error or a panicked worker becomes `Failed`.

use crate::config::Config;
use crate::importer::{FileTextImporter, ImportError};
use crate::job_controller::reporter::ChannelReporter;
use crate::job_controller::state::{JobUpdate, JobsState};
use crate::jobs::ProcessTextsJob;
use actix_web::{web, HttpResponse, Responder};
use common::jobs::JobStatus;
use common::requests::{StartImportRequest, StartImportResponse};
use log::{info, warn};
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The Actix web handler for `POST /api/imports/start`.
///
/// # Arguments
/// * `state` - Shared job state the new job is registered in.
/// * `config` - Folders, database and environment the import runs against.
/// * `body` - Optional JSON `StartImportRequest`. An empty body means defaults.
///
/// # Returns
/// - `200 OK` with a `StartImportResponse` holding the new `job_id`.
/// - `400 Bad Request` if the body is present but is not a valid request.
pub(crate) async fn process(
    state: web::Data<JobsState>,
    config: web::Data<Config>,
    body: web::Bytes,
) -> impl Responder {
    let req = match parse_request(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!("Rejected import request: {}", e);
            return HttpResponse::BadRequest().body(format!("Invalid import request: {}", e));
        }
    };
    let job_id = schedule_import_job(&state, config.into_inner(), req).await;
    HttpResponse::Ok().json(StartImportResponse { job_id })
}

fn parse_request(body: &[u8]) -> Result<StartImportRequest, serde_json::Error> {
    if body.trim_ascii().is_empty() {
        return Ok(StartImportRequest::default());
    }
    serde_json::from_slice(body)
}

/// Schedules an import to run in the background and returns its job id.
pub(crate) async fn schedule_import_job(
    state: &JobsState,
    config: Arc<Config>,
    req: StartImportRequest,
) -> String {
    let job_id = state.register_pending().await;
    let max_files = req.max_files.or(config.environment.max_files());
    info!("Scheduled import job {} (max files: {:?})", job_id, max_files);

    let tx = state.tx.clone();
    let job_id_clone = job_id.clone();

    tokio::spawn(async move {
        let tx_block = tx.clone();
        let job_id_for_blocking = job_id_clone.clone();

        let handle = tokio::task::spawn_blocking(move || {
            run_import_blocking(tx_block, job_id_for_blocking, &config, max_files)
        });

        let final_status = match handle.await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                warn!("Import job {} aborted: {}", job_id_clone, e);
                Some(JobStatus::Failed(e.to_string()))
            }
            Err(e) => Some(JobStatus::Failed(format!("Task join error: {}", e))),
        };

        // `None` means the job already reported its failure.
        if let Some(status) = final_status {
            let _ = tx.send(JobUpdate::new(job_id_clone, status)).await;
        }
    });

    job_id
}

/// Runs one import on the current (blocking) thread.
///
/// Returns the status the caller still has to publish, or `None` when the
/// job has already reported `Failed` through the reporter.
fn run_import_blocking(
    tx: mpsc::Sender<JobUpdate>,
    job_id: String,
    config: &Config,
    max_files: Option<usize>,
) -> Result<Option<JobStatus>, ImportError> {
    let mut reporter = ChannelReporter::new(tx, job_id);
    reporter.started();

    let conn = Connection::open(&config.database.path)?;
    let mut importer = FileTextImporter::new(
        &conn,
        &config.folders.source,
        &config.folders.destination,
        max_files,
    )?;

    ProcessTextsJob.handle(&mut importer, &mut reporter)?;

    if reporter.failure().is_some() {
        return Ok(None);
    }
    Ok(Some(JobStatus::Completed(format!(
        "Import complete: {}",
        importer.report()
    ))))
}
