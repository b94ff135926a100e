use serde::{Deserialize, Serialize};

/// Status of a background job as reported by `/api/layouts/status/{job_id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    /// JSON payload produced by the job.
    Completed(String),
    Failed(String),
}
