use super::{merge_documents, DocumentStore, Filter, StoreError};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

/// Map-backed store with switchable write failures, for exercising what a
/// half-applied mutation leaves behind.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every later write or delete on `collection` fails until
    /// [`MemoryStore::clear_failures`].
    pub fn fail_writes_to(&self, collection: &str) {
        self.failing.lock().unwrap().insert(collection.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    fn check_writable(&self, collection: &str) -> Result<(), StoreError> {
        if self.failing.lock().unwrap().contains(collection) {
            return Err(StoreError::Backend(format!(
                "write to '{collection}' rejected"
            )));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn set(&self, collection: &str, id: &str, doc: Value, merge: bool) -> Result<(), StoreError> {
        self.check_writable(collection)?;
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        let doc = if merge {
            merge_documents(docs.get(id).cloned(), doc)?
        } else if doc.is_object() {
            doc
        } else {
            return Err(StoreError::NotAnObject);
        };
        docs.insert(id.to_string(), doc);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_writable(collection)?;
        if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| docs.values().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }
}
