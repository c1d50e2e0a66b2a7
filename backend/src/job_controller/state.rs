//! Manages the state of long-running, asynchronous background jobs.
//!
//! Imports run outside the request/response cycle; this module tracks what
//! they are doing so clients can poll for it.
//!
//! The main components are:
//! - `JobsState`: A clonable, thread-safe struct that holds the shared state of all jobs.
//!   It is injected into the Actix application state in `main.rs`.
//! - `JobUpdate`: A message struct used to communicate status changes from a background
//!   job back to the central state manager.
//! - `start_job_updater`: A long-running task that listens for `JobUpdate` messages
//!   on an MPSC channel and updates the shared `JobsState` accordingly.

use common::jobs::JobStatus;
use log::{debug, info};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Capacity of the update channel between workers and the updater.
pub const UPDATE_CHANNEL_CAPACITY: usize = 100;

/// A thread-safe, shareable container for the state of all background jobs.
#[derive(Clone)]
pub struct JobsState {
    /// A map from a unique job ID to its current `JobStatus`.
    ///
    /// Read by the status endpoint, written by `start_job_updater` and by
    /// `register_pending` when a job is created.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Sender half of the update channel. Workers clone it to push
    /// `JobUpdate` messages without touching the `jobs` map directly.
    pub tx: mpsc::Sender<JobUpdate>,
}

/// Represents a status update for a specific background job.
#[derive(Debug)]
pub struct JobUpdate {
    /// The unique identifier of the job being updated.
    pub(crate) job_id: String,
    /// The new status of the job.
    pub(crate) status: JobStatus,
}

impl JobUpdate {
    pub fn new(job_id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            job_id: job_id.into(),
            status,
        }
    }
}

impl JobsState {
    /// Creates an empty state and the receiver `start_job_updater` must drain.
    pub fn new() -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        let state = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        (state, rx)
    }

    /// Allocates a job id and records it as `Pending`.
    pub async fn register_pending(&self) -> String {
        let job_id = Uuid::new_v4().to_string();
        self.jobs
            .write()
            .await
            .insert(job_id.clone(), JobStatus::Pending);
        job_id
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

/// Starts the central job state updater task.
///
/// Meant to be spawned once as a long-running task (see `main.rs`). Applies
/// every `JobUpdate` received on `rx` to the shared map and returns when all
/// senders are gone.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        if update.status.is_finished() {
            info!("Job {} finished: {:?}", update.job_id, update.status);
        } else {
            debug!("Job {} -> {:?}", update.job_id, update.status);
        }
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id, update.status);
    }
}
