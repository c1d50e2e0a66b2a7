use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The author or origin of a set of writings.
///
/// Rows are seeded by the `create_sources_table` migration and are never
/// modified afterwards. Names are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    pub source: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
