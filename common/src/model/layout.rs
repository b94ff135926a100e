use serde::{Deserialize, Serialize};
use std::fmt;

/// Elements the user wants on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EssentialInformation {
    #[serde(rename = "product name")]
    ProductName,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "brand logo")]
    BrandLogo,
    #[serde(rename = "QR code")]
    QrCode,
    #[serde(rename = "promotional message")]
    PromotionalMessage,
}

impl fmt::Display for EssentialInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EssentialInformation::ProductName => "product name",
            EssentialInformation::Price => "price",
            EssentialInformation::BrandLogo => "brand logo",
            EssentialInformation::QrCode => "QR code",
            EssentialInformation::PromotionalMessage => "promotional message",
        };
        f.write_str(text)
    }
}

/// Product and display description sent to the layout model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSuggestionInput {
    pub product_name: String,
    pub product_description: String,
    pub price: f64,
    /// Discount percentage.
    #[serde(default)]
    pub discount: Option<f64>,
    /// e.g. `2.9 inch`.
    pub display_size: String,
    /// e.g. `296x128 pixels`.
    pub resolution: String,
    #[serde(default)]
    pub essential_information: Vec<EssentialInformation>,
    pub constraints: String,
}

impl LayoutSuggestionInput {
    /// Rejects inputs the model should never see. Returns the first problem
    /// found.
    pub fn validate(&self) -> Result<(), String> {
        if self.product_name.trim().is_empty() {
            return Err("Product name is required.".to_string());
        }
        if self.product_description.trim().is_empty() {
            return Err("Product description is required.".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a positive number.".to_string());
        }
        if self.constraints.trim().is_empty() {
            return Err("Constraints are required.".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSuggestion {
    pub description: String,
    /// Text sketch showing where each element sits.
    pub visual_representation: String,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSuggestions {
    pub layout_suggestions: Vec<LayoutSuggestion>,
}
