use crate::model::product::ProductFields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Projection read by the label firmware, keyed by the label's MAC address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    pub mac_address: String,
    pub product_id: String,
    pub label_id: String,
    /// Catalog id of the template to render.
    pub template: String,
    pub template_model: TemplateModel,
    pub updated_at: String,
}

/// Data the firmware substitutes into the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateModel {
    pub product: ProductFields,
    /// Every field the template declares; fields left blank hold `""`.
    pub fields: BTreeMap<String, String>,
}
