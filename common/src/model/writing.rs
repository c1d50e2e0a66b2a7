use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One page (or segment) of text attributed to a [`Source`](super::source::Source).
///
/// `source_id` is a logical reference only; the `writings` table carries no
/// foreign key constraint, so it may point at a source that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Writing {
    pub id: i64,
    pub source_id: i64,
    pub title: Option<String>,
    pub body: String,
    pub page_num: Option<i64>,
    pub created_date: Option<NaiveDate>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A writing about to be inserted or updated. The id is part of the payload
/// because imported files carry their own identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWriting {
    pub id: Option<i64>,
    pub source_id: i64,
    pub title: Option<String>,
    pub body: String,
    pub page_num: Option<i64>,
    pub created_date: Option<NaiveDate>,
}
