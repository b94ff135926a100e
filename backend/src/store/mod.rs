//! Document storage.
//!
//! Records live as JSON objects addressed by collection name and document id,
//! the same shape the hosted document database used. [`DocumentStore`] is the
//! only thing the rest of the service sees; [`SqliteStore`] keeps everything
//! in one SQLite table. There are no transactions: each call stands alone.

pub mod collections;
#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed document {collection}/{id}: {source}")]
    Malformed {
        collection: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("documents must be JSON objects")]
    NotAnObject,
}

/// Predicate for [`DocumentStore::query`]. A field absent from a document
/// compares as `null`.
#[derive(Debug, Clone)]
pub enum Filter {
    All,
    Eq(String, Value),
    In(String, Vec<Value>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn is_in(field: &str, values: Vec<Value>) -> Self {
        Filter::In(field.to_string(), values)
    }

    pub fn matches(&self, doc: &Value) -> bool {
        let field_value = |field: &str| doc.get(field).unwrap_or(&Value::Null);
        match self {
            Filter::All => true,
            Filter::Eq(field, expected) => field_value(field) == expected,
            Filter::In(field, allowed) => allowed.contains(field_value(field)),
        }
    }
}

pub trait DocumentStore: Send + Sync {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Writes `doc` under `id`. With `merge`, top-level keys of `doc` are
    /// laid over the stored document (created if missing); otherwise the
    /// document is replaced.
    fn set(&self, collection: &str, id: &str, doc: Value, merge: bool) -> Result<(), StoreError>;

    /// Removing a document that does not exist is not an error.
    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Documents of `collection` matching `filter`, ordered by id.
    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;
}

/// Shallow merge used by merge-writes.
pub(crate) fn merge_documents(existing: Option<Value>, patch: Value) -> Result<Value, StoreError> {
    let Value::Object(patch) = patch else {
        return Err(StoreError::NotAnObject);
    };
    let mut base = match existing {
        Some(Value::Object(map)) => map,
        Some(_) => return Err(StoreError::NotAnObject),
        None => Map::new(),
    };
    for (key, value) in patch {
        base.insert(key, value);
    }
    Ok(Value::Object(base))
}
