//! Shared state of background jobs.
//!
//! Layout suggestion requests take seconds, so they run outside the
//! request/response cycle (see `services::layouts::suggest`). A job is
//! registered as `Pending`; the worker reports its outcome as a
//! [`JobUpdate`] on an mpsc channel, and [`start_job_updater`] is the only
//! writer of the final status. Clients poll `/api/layouts/status/{job_id}`.

use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Capacity of the update channel created in `main.rs`.
pub const UPDATE_CHANNEL_CAPACITY: usize = 100;

/// Cloned into every worker and injected into actix as `web::Data`.
#[derive(Clone)]
pub struct JobsState {
    /// Job id to latest known status.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,
    /// Workers report through this sender.
    pub tx: mpsc::Sender<JobUpdate>,
}

#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobsState {
    pub fn new() -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        let state = Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        (state, rx)
    }

    /// Registers a new `Pending` job and returns its id.
    pub async fn register(&self) -> String {
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

/// Applies updates until every sender is dropped. Spawned once from
/// `main.rs`.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id, update.status);
    }
}
