use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
/// Request payload for the import start endpoint.
/// `max_files` overrides the per-environment file limit when present.
pub struct StartImportRequest {
    #[serde(default)]
    pub max_files: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
/// Response of the import start endpoint.
pub struct StartImportResponse {
    pub job_id: String,
}
