//! Typed access to the collections the service uses.

use super::{DocumentStore, Filter, StoreError};
use common::model::command_log::CommandLogEntry;
use common::model::design::DesignAssignment;
use common::model::label::Label;
use common::model::product::Product;
use common::model::sync::SyncRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const LABELS: &str = "labels";
pub const PRODUCTS: &str = "products";
pub const DESIGNS: &str = "product_label_designs";
pub const LABEL_SYNC: &str = "label_sync";
pub const COMMAND_LOGS: &str = "command_logs";

fn decode<T: DeserializeOwned>(collection: &str, id: &str, doc: Value) -> Result<T, StoreError> {
    serde_json::from_value(doc).map_err(|source| StoreError::Malformed {
        collection: collection.to_string(),
        id: id.to_string(),
        source,
    })
}

fn encode<T: Serialize>(collection: &str, id: &str, record: &T) -> Result<Value, StoreError> {
    serde_json::to_value(record).map_err(|source| StoreError::Malformed {
        collection: collection.to_string(),
        id: id.to_string(),
        source,
    })
}

fn get_typed<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get(collection, id)?
        .map(|doc| decode(collection, id, doc))
        .transpose()
}

fn query_typed<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    filter: &Filter,
) -> Result<Vec<T>, StoreError> {
    store
        .query(collection, filter)?
        .into_iter()
        .map(|doc| decode(collection, "<query>", doc))
        .collect()
}

fn put_typed<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    record: &T,
) -> Result<(), StoreError> {
    store.set(collection, id, encode(collection, id, record)?, false)
}

/// Field-level merge write, so concurrent edits to other fields survive.
fn set_reference(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    field: &str,
    target: Option<&str>,
) -> Result<(), StoreError> {
    let mut patch = serde_json::Map::new();
    patch.insert(field.to_string(), target.map_or(Value::Null, Value::from));
    store.set(collection, id, Value::Object(patch), true)
}

pub fn get_label(store: &dyn DocumentStore, id: &str) -> Result<Option<Label>, StoreError> {
    get_typed(store, LABELS, id)
}

pub fn put_label(store: &dyn DocumentStore, label: &Label) -> Result<(), StoreError> {
    put_typed(store, LABELS, &label.id, label)
}

pub fn list_labels(store: &dyn DocumentStore, filter: &Filter) -> Result<Vec<Label>, StoreError> {
    query_typed(store, LABELS, filter)
}

pub fn set_label_product(
    store: &dyn DocumentStore,
    label_id: &str,
    product_id: Option<&str>,
) -> Result<(), StoreError> {
    set_reference(store, LABELS, label_id, "productId", product_id)
}

pub fn delete_label(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
    store.delete(LABELS, id)
}

pub fn get_product(store: &dyn DocumentStore, id: &str) -> Result<Option<Product>, StoreError> {
    get_typed(store, PRODUCTS, id)
}

pub fn put_product(store: &dyn DocumentStore, product: &Product) -> Result<(), StoreError> {
    put_typed(store, PRODUCTS, &product.id, product)
}

/// Overwrites the editable fields of a product, leaving `labelId` alone.
pub fn merge_product_fields(store: &dyn DocumentStore, product: &Product) -> Result<(), StoreError> {
    let doc = encode(PRODUCTS, &product.id, &product.fields)?;
    store.set(PRODUCTS, &product.id, doc, true)
}

pub fn list_products(
    store: &dyn DocumentStore,
    filter: &Filter,
) -> Result<Vec<Product>, StoreError> {
    query_typed(store, PRODUCTS, filter)
}

pub fn set_product_label(
    store: &dyn DocumentStore,
    product_id: &str,
    label_id: Option<&str>,
) -> Result<(), StoreError> {
    set_reference(store, PRODUCTS, product_id, "labelId", label_id)
}

pub fn delete_product(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
    store.delete(PRODUCTS, id)
}

pub fn get_design(
    store: &dyn DocumentStore,
    product_id: &str,
    label_id: &str,
) -> Result<Option<DesignAssignment>, StoreError> {
    get_typed(store, DESIGNS, &DesignAssignment::key(product_id, label_id))
}

pub fn put_design(store: &dyn DocumentStore, design: &DesignAssignment) -> Result<(), StoreError> {
    put_typed(store, DESIGNS, &design.id(), design)
}

pub fn delete_design(
    store: &dyn DocumentStore,
    product_id: &str,
    label_id: &str,
) -> Result<(), StoreError> {
    store.delete(DESIGNS, &DesignAssignment::key(product_id, label_id))
}

/// Removes every design assignment whose `field` (`productId` or `labelId`)
/// equals `id`. Returns how many were removed.
pub fn delete_designs_where(
    store: &dyn DocumentStore,
    field: &str,
    id: &str,
) -> Result<usize, StoreError> {
    let designs: Vec<DesignAssignment> = query_typed(store, DESIGNS, &Filter::eq(field, id))?;
    for design in &designs {
        store.delete(DESIGNS, &design.id())?;
    }
    Ok(designs.len())
}

pub fn get_sync(store: &dyn DocumentStore, mac_address: &str) -> Result<Option<SyncRecord>, StoreError> {
    get_typed(store, LABEL_SYNC, mac_address)
}

pub fn put_sync(store: &dyn DocumentStore, record: &SyncRecord) -> Result<(), StoreError> {
    put_typed(store, LABEL_SYNC, &record.mac_address, record)
}

pub fn delete_sync(store: &dyn DocumentStore, mac_address: &str) -> Result<(), StoreError> {
    store.delete(LABEL_SYNC, mac_address)
}

pub fn put_log_entry(store: &dyn DocumentStore, entry: &CommandLogEntry) -> Result<(), StoreError> {
    put_typed(store, COMMAND_LOGS, &entry.id, entry)
}

pub fn list_log_entries(store: &dyn DocumentStore) -> Result<Vec<CommandLogEntry>, StoreError> {
    query_typed(store, COMMAND_LOGS, &Filter::All)
}

pub fn delete_log_entries(store: &dyn DocumentStore) -> Result<usize, StoreError> {
    let entries = list_log_entries(store)?;
    for entry in &entries {
        store.delete(COMMAND_LOGS, &entry.id)?;
    }
    Ok(entries.len())
}
