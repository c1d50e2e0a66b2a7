//! # Writings Service Module
//!
//! Read-only access to the imported texts.
//!
//! ## Registered Routes:
//! - `GET /api/sources`: every source, ordered by id.
//! - `GET /api/sources/{source_id}`: a single source, `404` when it does not exist.
//! - `GET /api/sources/{source_id}/writings`: the writings of one source, ordered by page.
//! - `GET /api/writings/{writing_id}`: a single writing, `404` when it does not exist.

mod get;

use actix_web::web::{get, ServiceConfig};

/// Plain resources, not an `/api` scope: a scope would shadow `/api/imports`.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/api/sources", get().to(get::sources))
        .route("/api/sources/{source_id}", get().to(get::source))
        .route(
            "/api/sources/{source_id}/writings",
            get().to(get::source_writings),
        )
        .route("/api/writings/{writing_id}", get().to(get::writing));
}
