//! The command log: one entry per mutation, shown on the history page.
//!
//! Appends are best effort. Callers log a failed append and carry on; the
//! mutation it describes is never undone.

use crate::store::collections::{delete_log_entries, list_log_entries, put_log_entry};
use crate::store::{DocumentStore, StoreError};
use chrono::{SecondsFormat, Utc};
use common::model::command_log::CommandLogEntry;
use std::sync::Arc;
use uuid::Uuid;

/// Default and maximum number of entries returned by [`recent_entries`].
pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub command: String,
    pub details: String,
    pub product: Option<String>,
    pub label: Option<String>,
}

impl AuditEvent {
    pub fn new(command: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            details: details.into(),
            product: None,
            label: None,
        }
    }

    pub fn product(mut self, product_id: &str) -> Self {
        self.product = Some(product_id.to_string());
        self
    }

    pub fn label(mut self, label_id: &str) -> Self {
        self.label = Some(label_id.to_string());
        self
    }
}

pub trait AuditSink: Send + Sync {
    fn append(&self, event: AuditEvent) -> Result<CommandLogEntry, StoreError>;
}

/// Writes entries into the `command_logs` collection.
pub struct StoreAuditSink {
    store: Arc<dyn DocumentStore>,
}

impl StoreAuditSink {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl AuditSink for StoreAuditSink {
    fn append(&self, event: AuditEvent) -> Result<CommandLogEntry, StoreError> {
        let entry = CommandLogEntry {
            id: Uuid::new_v4().to_string(),
            command: event.command,
            details: event.details,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            product: event.product,
            label: event.label,
        };
        put_log_entry(self.store.as_ref(), &entry)?;
        Ok(entry)
    }
}

/// Newest entries first, at most `limit` (capped at [`HISTORY_LIMIT`]).
pub fn recent_entries(
    store: &dyn DocumentStore,
    limit: usize,
) -> Result<Vec<CommandLogEntry>, StoreError> {
    let mut entries = list_log_entries(store)?;
    // RFC 3339 with a fixed precision and `Z` sorts lexicographically.
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
    entries.truncate(limit.min(HISTORY_LIMIT));
    Ok(entries)
}

/// Empties the command log. Returns how many entries were removed.
pub fn clear_entries(store: &dyn DocumentStore) -> Result<usize, StoreError> {
    delete_log_entries(store)
}
