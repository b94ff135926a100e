use serde::{Deserialize, Serialize};

/// Editable product attributes, as entered on the product form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub sku: String,
    pub price: f64,
    #[serde(default)]
    pub promo_price: Option<f64>,
    /// Price per unit of measure, free text (e.g. `"12,90 x kg"`).
    #[serde(default)]
    pub proportional_value: String,
    #[serde(default)]
    pub unit_of_measure: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub gtin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(flatten)]
    pub fields: ProductFields,
    pub label_id: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, fields: ProductFields) -> Self {
        Self {
            id: id.into(),
            fields,
            label_id: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.label_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_flattened_into_the_document() {
        let product = Product::new(
            "p1",
            ProductFields {
                name: "Leite".into(),
                sku: "000123".into(),
                price: 4.99,
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["name"], "Leite");
        assert_eq!(json["price"], 4.99);
        assert!(json["labelId"].is_null());
        assert!(json["promoPrice"].is_null());

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn missing_optional_fields_default() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p2","name":"Café","sku":"9","price":12.5,"labelId":"001A2B3C4D5E"}"#,
        )
        .unwrap();
        assert_eq!(product.fields.brand, "");
        assert_eq!(product.fields.promo_price, None);
        assert_eq!(product.label_id.as_deref(), Some("001A2B3C4D5E"));
    }
}
