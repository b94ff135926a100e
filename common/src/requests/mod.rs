//! Request payloads accepted by the HTTP API.
//!
//! Validation here is shallow on purpose: required fields must be present and
//! non-blank. It runs before any document is written.

use crate::model::product::ProductFields;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Payload for `POST /api/labels`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabelRequest {
    pub mac_address: String,
}

impl CreateLabelRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.mac_address.trim().is_empty() {
            return Err("MAC address is required".to_string());
        }
        Ok(())
    }
}

/// Payload for `POST /api/labels/link` and `POST /api/labels/unlink`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub label_id: String,
    pub product_id: String,
}

impl LinkRequest {
    pub fn validate(&self) -> Result<(), String> {
        require("labelId", &self.label_id)?;
        require("productId", &self.product_id)
    }
}

/// Payload for `POST /api/labels/relink`: moves a label from one product to
/// another.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelinkRequest {
    pub label_id: String,
    pub old_product_id: String,
    pub new_product_id: String,
}

impl RelinkRequest {
    pub fn validate(&self) -> Result<(), String> {
        require("labelId", &self.label_id)?;
        require("oldProductId", &self.old_product_id)?;
        require("newProductId", &self.new_product_id)
    }
}

/// Template choice for a product/label pair. A `null` design id clears the
/// choice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSelection {
    pub design_id: Option<String>,
    #[serde(default)]
    pub design_data: BTreeMap<String, String>,
}

/// Payload for `PUT /api/products/{id}/design`. Without `label_id` the
/// product's current label is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDesignRequest {
    #[serde(default)]
    pub label_id: Option<String>,
    #[serde(flatten)]
    pub selection: DesignSelection,
}

/// Payload for creating (`POST /api/products`) or updating
/// (`PUT /api/products/{id}`) a product.
///
/// `label_id` is the label the product should end up linked to; on update a
/// different value than the stored one moves the link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(flatten)]
    pub fields: ProductFields,
    #[serde(default)]
    pub label_id: Option<String>,
    #[serde(default)]
    pub design: Option<DesignSelection>,
}

impl ProductRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.fields.name.trim().is_empty()
            || self.fields.sku.trim().is_empty()
            || !self.fields.price.is_finite()
            || self.fields.price < 0.0
        {
            return Err("Name, price and SKU are required".to_string());
        }
        if let Some(promo) = self.fields.promo_price {
            if !promo.is_finite() || promo < 0.0 {
                return Err("Promotional price must be a positive number".to_string());
            }
        }
        if matches!(&self.label_id, Some(id) if id.trim().is_empty()) {
            return Err("labelId must not be blank".to_string());
        }
        if self.design.is_some() && self.label_id.is_none() {
            return Err("A design needs a labelId".to_string());
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_request_reads_flat_form_payload() {
        let req: ProductRequest = serde_json::from_str(
            r#"{"name":"Leite","sku":"123","price":4.5,"labelId":"001A2B3C4D5E",
                "design":{"designId":"template-6","designData":{"Valor":"4,50"}}}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.fields.name, "Leite");
        assert_eq!(req.label_id.as_deref(), Some("001A2B3C4D5E"));
        let design = req.design.unwrap();
        assert_eq!(design.design_id.as_deref(), Some("template-6"));
        assert_eq!(design.design_data["Valor"], "4,50");
    }

    #[test]
    fn product_request_requires_name_and_sku() {
        let req: ProductRequest =
            serde_json::from_str(r#"{"name":"","sku":"123","price":1.0}"#).unwrap();
        assert!(req.validate().is_err());
        let req: ProductRequest =
            serde_json::from_str(r#"{"name":"Leite","sku":" ","price":1.0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn product_request_rejects_design_without_label() {
        let req: ProductRequest = serde_json::from_str(
            r#"{"name":"Leite","sku":"123","price":4.5,
                "design":{"designId":"template-6","designData":{}}}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap_err(), "A design needs a labelId");
    }

    #[test]
    fn set_design_request_defaults_to_no_label() {
        let req: SetDesignRequest =
            serde_json::from_str(r#"{"designId":null,"designData":{}}"#).unwrap();
        assert_eq!(req.label_id, None);
        assert_eq!(req.selection.design_id, None);
        assert!(req.selection.design_data.is_empty());
    }

    #[test]
    fn blank_mac_is_rejected() {
        let req = CreateLabelRequest {
            mac_address: "   ".into(),
        };
        assert_eq!(req.validate().unwrap_err(), "MAC address is required");
    }

    #[test]
    fn link_request_names_missing_field() {
        let req = LinkRequest {
            label_id: "001A2B3C4D5E".into(),
            product_id: "".into(),
        };
        assert_eq!(req.validate().unwrap_err(), "productId is required");
    }
}
