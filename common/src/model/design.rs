use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The template chosen for a linked product/label pair and the values typed
/// into its fields. Stored under [`DesignAssignment::key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignAssignment {
    pub product_id: String,
    pub label_id: String,
    pub design_id: Option<String>,
    #[serde(default)]
    pub design_data: BTreeMap<String, String>,
}

impl DesignAssignment {
    pub fn key(product_id: &str, label_id: &str) -> String {
        format!("{product_id}_{label_id}")
    }

    pub fn id(&self) -> String {
        Self::key(&self.product_id, &self.label_id)
    }
}
