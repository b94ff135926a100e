//! Types shared between the TechLabel service and its clients.
//!
//! Everything here is plain serde data: the documents kept in the store
//! (`model`), the payloads accepted by the HTTP API (`requests`) and the
//! status of background jobs (`jobs`).

pub mod jobs;
pub mod model;
pub mod requests;
