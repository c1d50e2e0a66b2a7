use serde::{Deserialize, Serialize};

/// Lifecycle of a background import job as seen by clients polling
/// `/api/imports/status/{job_id}`.
///
/// `InProgress` doubles as the "running" state; its value is a percentage
/// on a 0-100 scale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress(u32),
    Completed(String),
    Failed(String),
}

impl JobStatus {
    /// Whether the job has reached `Completed` or `Failed`.
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed(_) | JobStatus::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_states() {
        assert!(!JobStatus::Pending.is_finished());
        assert!(!JobStatus::InProgress(50).is_finished());
        assert!(JobStatus::Completed("done".into()).is_finished());
        assert!(JobStatus::Failed("boom".into()).is_finished());
    }

    #[test]
    fn serializes_externally_tagged() {
        let json = serde_json::to_string(&JobStatus::InProgress(50)).unwrap();
        assert_eq!(json, r#"{"InProgress":50}"#);
    }
}
