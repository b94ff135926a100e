//! # Layout Suggestion Module
//!
//! Asks the generative model for label layouts. A request may take several
//! seconds, so it runs as a background job (`job_controller`).
//!
//! *   **`POST /suggest`**: validates a `LayoutSuggestionInput`, starts a job
//!     and returns `{ "job_id": ... }` at once.
//! *   **`GET /status/{job_id}`**: the job's `JobStatus`. A completed job
//!     carries the suggestions as a JSON string.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod get_status;
mod suggest;

const API_PATH: &str = "/api/layouts";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/suggest", post().to(suggest::process))
        .route("/status/{job_id}", get().to(get_status::process))
}
