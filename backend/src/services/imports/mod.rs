//! Text import jobs over HTTP.
//!
//! - `POST /api/imports/start`: schedules a background import of the configured
//!   source folder and immediately returns `{ "job_id": ... }`. An optional JSON
//!   body `{ "max_files": n }` overrides the environment's file limit; a
//!   malformed body is rejected with `400`.
//!
//! - `GET /api/imports/status/{job_id}`: returns the current `JobStatus`
//!   (`Pending`, `InProgress`, `Completed` or `Failed`) from the shared
//!   `JobsState`, or `404` for unknown ids.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod get_status;
pub(crate) mod start;

const API_PATH: &str = "/api/imports";

/// Configures and returns the Actix scope for import routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/start", post().to(start::process))
        .route("/status/{job_id}", get().to(get_status::process))
}
