//! Layout suggestions from a generative model.
//!
//! The model is an opaque remote call: a rendered prompt goes out, a JSON
//! list of suggestions comes back. Calls are never retried.

mod gemini;

pub use gemini::GeminiLayoutSuggester;

use crate::error::ServiceError;
use common::model::layout::{LayoutSuggestionInput, LayoutSuggestions};
use std::fmt::Write;
use std::future::Future;
use std::pin::Pin;

/// Boxed future so [`LayoutSuggester`] stays object safe.
pub type SuggestFuture<'a> =
    Pin<Box<dyn Future<Output = Result<LayoutSuggestions, ServiceError>> + Send + 'a>>;

pub trait LayoutSuggester: Send + Sync {
    fn suggest<'a>(&'a self, input: &'a LayoutSuggestionInput) -> SuggestFuture<'a>;
}

pub fn render_prompt(input: &LayoutSuggestionInput) -> String {
    let mut prompt = String::from(
        "You are an expert in designing electronic shelf label (ESL) layouts that maximize \
         readability and visual appeal.\n\n\
         Given the following product information and display constraints, suggest three \
         optimal ESL layouts.\n\n",
    );
    let _ = writeln!(prompt, "Product Name: {}", input.product_name);
    let _ = writeln!(prompt, "Product Description: {}", input.product_description);
    let _ = writeln!(prompt, "Price: {}", input.price);
    if let Some(discount) = input.discount.filter(|d| *d != 0.0) {
        let _ = writeln!(prompt, "Discount: {discount}%");
    }
    let _ = writeln!(prompt, "Display Size: {}", input.display_size);
    let _ = writeln!(prompt, "Resolution: {}", input.resolution);
    let essentials: Vec<String> = input
        .essential_information
        .iter()
        .map(ToString::to_string)
        .collect();
    let _ = writeln!(prompt, "Essential Information: {}", essentials.join(", "));
    let _ = writeln!(prompt, "Constraints: {}", input.constraints);
    prompt.push_str(
        "\nConsider the following factors when generating the layouts:\n\
         - Readability: Ensure that the most important information (e.g., price, product name) \
         is easily readable from a distance.\n\
         - Visual Hierarchy: Use font sizes, colors, and placement to create a clear visual \
         hierarchy.\n\
         - Branding: Incorporate the brand logo and colors where appropriate.\n\
         - Information Density: Avoid overcrowding the label with too much information.\n\n\
         For each layout suggestion, provide a brief description, a text-based visual \
         representation, and a justification for why it is optimal.\n\n\
         Answer with JSON only, shaped as {\"layoutSuggestions\": [{\"description\": string, \
         \"visualRepresentation\": string, \"justification\": string}]}.\n",
    );
    prompt
}

/// Parses the model's answer, tolerating a surrounding markdown code fence.
pub fn parse_suggestions(text: &str) -> Result<LayoutSuggestions, ServiceError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    let suggestions: LayoutSuggestions = serde_json::from_str(body.trim())
        .map_err(|e| ServiceError::Upstream(format!("unexpected model output: {e}")))?;
    if suggestions.layout_suggestions.is_empty() {
        return Err(ServiceError::Upstream(
            "the model returned no layout suggestions".to_string(),
        ));
    }
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::layout::EssentialInformation;

    fn input() -> LayoutSuggestionInput {
        LayoutSuggestionInput {
            product_name: "Leite Integral".into(),
            product_description: "Leite UHT 1L".into(),
            price: 4.99,
            discount: Some(10.0),
            display_size: "2.9 inch".into(),
            resolution: "296x128 pixels".into(),
            essential_information: vec![
                EssentialInformation::ProductName,
                EssentialInformation::Price,
                EssentialInformation::QrCode,
            ],
            constraints: "prioritize price visibility".into(),
        }
    }

    #[test]
    fn prompt_lists_product_and_display() {
        let prompt = render_prompt(&input());
        assert!(prompt.contains("Product Name: Leite Integral\n"));
        assert!(prompt.contains("Discount: 10%\n"));
        assert!(prompt.contains("Essential Information: product name, price, QR code\n"));
        assert!(prompt.contains("Resolution: 296x128 pixels\n"));
    }

    #[test]
    fn prompt_omits_missing_discount() {
        let mut no_discount = input();
        no_discount.discount = None;
        assert!(!render_prompt(&no_discount).contains("Discount"));
    }

    #[test]
    fn parses_fenced_json() {
        let text = "```json\n{\"layoutSuggestions\":[{\"description\":\"Price first\",\
                    \"visualRepresentation\":\"[PRICE]\\n[name]\",\"justification\":\"Readable\"}]}\n```";
        let parsed = parse_suggestions(text).unwrap();
        assert_eq!(parsed.layout_suggestions.len(), 1);
        assert_eq!(parsed.layout_suggestions[0].description, "Price first");
    }

    #[test]
    fn empty_answer_is_an_upstream_error() {
        let err = parse_suggestions(r#"{"layoutSuggestions":[]}"#).unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(_)));
        assert!(parse_suggestions("sorry, no").is_err());
    }
}
