use super::{merge_documents, DocumentStore, Filter, StoreError};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// All collections in one `documents` table, bodies stored as JSON text.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            log::warn!("Failed to enable WAL mode: {err}");
        }
        let store = Self::init(conn)?;
        info!("Document store opened at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                 collection TEXT NOT NULL,
                 id         TEXT NOT NULL,
                 body       TEXT NOT NULL,
                 PRIMARY KEY (collection, id)
             )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn read_body(collection: &str, id: &str, body: &str) -> Result<Value, StoreError> {
    serde_json::from_str(body).map_err(|source| StoreError::Malformed {
        collection: collection.to_string(),
        id: id.to_string(),
        source,
    })
}

fn fetch(conn: &Connection, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;
    body.map(|b| read_body(collection, id, &b)).transpose()
}

impl DocumentStore for SqliteStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let conn = self.lock();
        fetch(&conn, collection, id)
    }

    fn set(&self, collection: &str, id: &str, doc: Value, merge: bool) -> Result<(), StoreError> {
        let conn = self.lock();
        let doc = if merge {
            merge_documents(fetch(&conn, collection, id)?, doc)?
        } else if doc.is_object() {
            doc
        } else {
            return Err(StoreError::NotAnObject);
        };
        conn.execute(
            "INSERT OR REPLACE INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection, id, doc.to_string()],
        )?;
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.lock().execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        Ok(())
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut docs = Vec::new();
        for row in rows {
            let (id, body) = row?;
            let doc = read_body(collection, &id, &body)?;
            if filter.matches(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_get_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .set("labels", "L1", json!({ "id": "L1", "productId": null }), false)
            .unwrap();
        assert_eq!(
            store.get("labels", "L1").unwrap(),
            Some(json!({ "id": "L1", "productId": null }))
        );
        store.delete("labels", "L1").unwrap();
        assert_eq!(store.get("labels", "L1").unwrap(), None);
        store.delete("labels", "L1").unwrap();
    }

    #[test]
    fn merge_write_updates_single_field() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .set("labels", "L1", json!({ "id": "L1", "macAddress": "m" }), false)
            .unwrap();
        store
            .set("labels", "L1", json!({ "productId": "p1" }), true)
            .unwrap();
        let doc = store.get("labels", "L1").unwrap().unwrap();
        assert_eq!(doc["macAddress"], "m");
        assert_eq!(doc["productId"], "p1");
    }

    #[test]
    fn query_is_scoped_to_collection() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("labels", "B", json!({ "productId": null }), false).unwrap();
        store.set("labels", "A", json!({ "productId": "p1" }), false).unwrap();
        store.set("products", "p1", json!({ "labelId": "A" }), false).unwrap();

        let all = store.query("labels", &Filter::All).unwrap();
        assert_eq!(all.len(), 2);
        let free = store
            .query("labels", &Filter::eq("productId", Value::Null))
            .unwrap();
        assert_eq!(free, vec![json!({ "productId": null })]);
    }

    #[test]
    fn file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("techlabel.sqlite");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("products", "p1", json!({ "name": "Leite" }), false).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("products", "p1").unwrap().unwrap()["name"], "Leite");
    }
}
