use serde::{Deserialize, Serialize};

/// An electronic shelf label, keyed by its normalized MAC address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub mac_address: String,
    /// The product currently shown on this label, if any.
    pub product_id: Option<String>,
}

impl Label {
    /// Builds an unlinked label whose id is derived from `mac_address`.
    pub fn new(mac_address: &str) -> Self {
        let mac_address = mac_address.trim().to_string();
        Self {
            id: label_id_from_mac(&mac_address),
            mac_address,
            product_id: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.product_id.is_some()
    }
}

/// Derives the label id from a MAC address: separators are dropped and hex
/// digits upper-cased, so `00:1a:2b:3c:4d:5e` becomes `001A2B3C4D5E`.
pub fn label_id_from_mac(mac_address: &str) -> String {
    mac_address
        .trim()
        .chars()
        .filter(|c| !matches!(c, ':' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_strips_colons() {
        let label = Label::new("00:1A:2B:3C:4D:5E");
        assert_eq!(label.id, "001A2B3C4D5E");
        assert_eq!(label.mac_address, "00:1A:2B:3C:4D:5E");
        assert!(!label.is_linked());
    }

    #[test]
    fn id_normalizes_case_and_dashes() {
        assert_eq!(label_id_from_mac(" 00-1a-2b-3c-4d-5e "), "001A2B3C4D5E");
    }

    #[test]
    fn unlinked_label_serializes_explicit_null() {
        let json = serde_json::to_value(Label::new("AA:BB:CC:DD:EE:FF")).unwrap();
        assert_eq!(json["macAddress"], "AA:BB:CC:DD:EE:FF");
        assert!(json["productId"].is_null());
        assert!(json.as_object().unwrap().contains_key("productId"));
    }
}
