//! # Writings Retrieval Service
//!
//! Backend logic for the read-only endpoints over imported texts.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: each handler receives its path parameter (if any) and the
//!     shared `Config`.
//!
//! 2.  **Database Query**: a fresh connection to `config.database.path` is opened
//!     and the matching query from `crate::db` runs against it.
//!
//! 3.  **HTTP Response**: rows are serialized as JSON with `200 OK`. A missing row
//!     gives `404 Not Found`; a database that cannot be opened or queried gives
//!     `503 Service Unavailable`.

use crate::config::Config;
use crate::db;
use actix_web::{web, HttpResponse, Responder};
use rusqlite::Connection;

fn open(config: &Config) -> Result<Connection, String> {
    Connection::open(&config.database.path).map_err(|e| e.to_string())
}

fn unavailable(e: String) -> HttpResponse {
    HttpResponse::ServiceUnavailable().body(format!("Error retrieving writings: {}", e))
}

/// Actix web handler for `GET /api/sources`.
///
/// # Returns
/// - `200 OK` with every `Source`, ordered by id.
/// - `503 Service Unavailable` if the sources cannot be read.
pub async fn sources(config: web::Data<Config>) -> impl Responder {
    let result = open(&config)
        .and_then(|conn| db::sources::list_sources(&conn).map_err(|e| e.to_string()));

    match result {
        Ok(sources) => HttpResponse::Ok().json(sources),
        Err(e) => unavailable(e),
    }
}

/// Actix web handler for `GET /api/sources/{source_id}`.
///
/// # Arguments
/// * `source_id` - Id of the source, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the `Source` as JSON.
/// - `404 Not Found` if no source has this id.
/// - `503 Service Unavailable` on database errors.
pub async fn source(source_id: web::Path<i64>, config: web::Data<Config>) -> impl Responder {
    let source_id = source_id.into_inner();
    let result = open(&config)
        .and_then(|conn| db::sources::find_source(&conn, source_id).map_err(|e| e.to_string()));

    match result {
        Ok(Some(source)) => HttpResponse::Ok().json(source),
        Ok(None) => HttpResponse::NotFound().body("Source not found"),
        Err(e) => unavailable(e),
    }
}

/// Actix web handler for `GET /api/sources/{source_id}/writings`.
///
/// # Arguments
/// * `source_id` - Id of the source, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the source's writings ordered by `page_num`, then `id`. An
///   unknown source yields an empty list.
/// - `503 Service Unavailable` on database errors.
pub async fn source_writings(
    source_id: web::Path<i64>,
    config: web::Data<Config>,
) -> impl Responder {
    let source_id = source_id.into_inner();
    let result = open(&config).and_then(|conn| {
        db::writings::writings_for_source(&conn, source_id).map_err(|e| e.to_string())
    });

    match result {
        Ok(writings) => HttpResponse::Ok().json(writings),
        Err(e) => unavailable(e),
    }
}

/// Actix web handler for `GET /api/writings/{writing_id}`.
///
/// # Arguments
/// * `writing_id` - Id of the writing, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the `Writing` as JSON.
/// - `404 Not Found` if no writing has this id.
/// - `503 Service Unavailable` on database errors.
pub async fn writing(writing_id: web::Path<i64>, config: web::Data<Config>) -> impl Responder {
    let writing_id = writing_id.into_inner();
    let result = open(&config)
        .and_then(|conn| db::writings::find_writing(&conn, writing_id).map_err(|e| e.to_string()));

    match result {
        Ok(Some(writing)) => HttpResponse::Ok().json(writing),
        Ok(None) => HttpResponse::NotFound().body("Writing not found"),
        Err(e) => unavailable(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, DatabaseConfig};
    use crate::db;
    use actix_web::{http::StatusCode, test, web, App};
    use common::model::source::Source;
    use common::model::writing::{NewWriting, Writing};
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Config) {
        let root = tempfile::tempdir().unwrap();
        let config = Config {
            database: DatabaseConfig {
                path: root.path().join("writings.sqlite"),
            },
            ..Default::default()
        };
        let conn = db::open_and_migrate(&config.database.path).unwrap();
        for (page, body) in [(2, "zwei"), (1, "eins")] {
            db::writings::insert_writing(
                &conn,
                &NewWriting {
                    id: None,
                    source_id: 1,
                    title: None,
                    body: body.to_string(),
                    page_num: Some(page),
                    created_date: None,
                },
            )
            .unwrap();
        }
        (root, config)
    }

    macro_rules! app {
        ($config:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($config))
                    .configure(super::super::configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn lists_seeded_sources() {
        let (_root, config) = fixture();
        let app = app!(config);

        let req = test::TestRequest::get().uri("/api/sources").to_request();
        let sources: Vec<Source> = test::call_and_read_body_json(&app, req).await;

        let names: Vec<_> = sources.into_iter().map(|s| s.source).collect();
        assert_eq!(names, vec!["Irmgard", "Philipp"]);
    }

    #[actix_web::test]
    async fn fetches_single_source() {
        let (_root, config) = fixture();
        let app = app!(config);

        let req = test::TestRequest::get().uri("/api/sources/2").to_request();
        let source: Source = test::call_and_read_body_json(&app, req).await;
        assert_eq!(source.source, "Philipp");

        let req = test::TestRequest::get().uri("/api/sources/7").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn lists_writings_of_a_source_by_page() {
        let (_root, config) = fixture();
        let app = app!(config);

        let req = test::TestRequest::get()
            .uri("/api/sources/1/writings")
            .to_request();
        let writings: Vec<Writing> = test::call_and_read_body_json(&app, req).await;

        let bodies: Vec<_> = writings.into_iter().map(|w| w.body).collect();
        assert_eq!(bodies, vec!["eins", "zwei"]);
    }

    #[actix_web::test]
    async fn unknown_source_has_no_writings() {
        let (_root, config) = fixture();
        let app = app!(config);

        let req = test::TestRequest::get()
            .uri("/api/sources/42/writings")
            .to_request();
        let writings: Vec<Writing> = test::call_and_read_body_json(&app, req).await;
        assert!(writings.is_empty());
    }

    #[actix_web::test]
    async fn fetches_single_writing() {
        let (_root, config) = fixture();
        let app = app!(config);

        let req = test::TestRequest::get().uri("/api/writings/1").to_request();
        let writing: Writing = test::call_and_read_body_json(&app, req).await;
        assert_eq!(writing.body, "zwei");

        let req = test::TestRequest::get().uri("/api/writings/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn broken_database_is_unavailable() {
        let root = tempfile::tempdir().unwrap();
        let config = Config {
            // a directory cannot be opened as a database file
            database: DatabaseConfig {
                path: root.path().to_path_buf(),
            },
            ..Default::default()
        };
        let app = app!(config);

        let req = test::TestRequest::get().uri("/api/sources").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
