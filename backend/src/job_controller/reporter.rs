//! [`JobReporter`] implementations: one feeding the job updater, one for
//! foreground runs that only logs.

use crate::job_controller::state::JobUpdate;
use crate::jobs::JobReporter;
use common::jobs::JobStatus;
use log::{error, info, warn};
use tokio::sync::mpsc;

/// [`JobReporter`] that turns callbacks into `JobUpdate` messages.
///
/// Uses `blocking_send`, so it must only be driven from a blocking context
/// such as `tokio::task::spawn_blocking`.
pub struct ChannelReporter {
    job_id: String,
    tx: mpsc::Sender<JobUpdate>,
    failure: Option<String>,
}

impl ChannelReporter {
    pub fn new(tx: mpsc::Sender<JobUpdate>, job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            tx,
            failure: None,
        }
    }

    /// Moves the job from `Pending` to running.
    pub fn started(&mut self) {
        self.send(JobStatus::InProgress(0));
    }

    /// The reason passed to `failed`, if the job reported one.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    fn send(&self, status: JobStatus) {
        if self
            .tx
            .blocking_send(JobUpdate::new(self.job_id.as_str(), status))
            .is_err()
        {
            warn!("Job updater is gone, dropping update for job {}", self.job_id);
        }
    }
}

impl JobReporter for ChannelReporter {
    fn progress(&mut self, percent: u32) {
        self.send(JobStatus::InProgress(percent.min(100)));
    }

    fn failed(&mut self, reason: &str) {
        self.failure = Some(reason.to_string());
        self.send(JobStatus::Failed(reason.to_string()));
    }
}

/// [`JobReporter`] for foreground imports started from the command line.
#[derive(Debug, Default)]
pub struct LogReporter {
    failure: Option<String>,
}

impl LogReporter {
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

impl JobReporter for LogReporter {
    fn progress(&mut self, percent: u32) {
        info!("Progress: {}%", percent);
    }

    fn failed(&mut self, reason: &str) {
        error!("Import failed: {}", reason);
        self.failure = Some(reason.to_string());
    }
}
