use super::{parse_suggestions, render_prompt, LayoutSuggester, SuggestFuture};
use crate::config::GenAiConfig;
use crate::error::ServiceError;
use common::model::layout::LayoutSuggestionInput;
use log::{error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Calls the Gemini `generateContent` endpoint.
pub struct GeminiLayoutSuggester {
    client: Client,
    config: GenAiConfig,
}

impl GeminiLayoutSuggester {
    pub fn new(config: GenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Text of the first candidate.
fn first_candidate_text(body: &str) -> Result<String, ServiceError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::Upstream(format!("failed to parse model response: {e}")))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ServiceError::Upstream("model returned no candidates".to_string()))
}

impl LayoutSuggester for GeminiLayoutSuggester {
    fn suggest<'a>(&'a self, input: &'a LayoutSuggestionInput) -> SuggestFuture<'a> {
        Box::pin(async move {
            let api_key = self.config.api_key.as_deref().ok_or_else(|| {
                ServiceError::Upstream("GEMINI_API_KEY is not configured".to_string())
            })?;

            let prompt = render_prompt(input);
            let body = GenerateRequest {
                contents: vec![Content {
                    role: "user",
                    parts: vec![Part { text: &prompt }],
                }],
                generation_config: GenerationConfig {
                    response_mime_type: "application/json",
                },
            };

            info!(
                "Requesting layout suggestions for '{}' from {}",
                input.product_name, self.config.model
            );
            let response = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| ServiceError::Upstream(format!("request failed: {e}")))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| ServiceError::Upstream(format!("failed to read response: {e}")))?;

            if !status.is_success() {
                let message = serde_json::from_str::<ApiError>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                error!("Layout model answered {}: {message}", status.as_u16());
                return Err(ServiceError::Upstream(format!(
                    "model error ({}): {message}",
                    status.as_u16()
                )));
            }

            parse_suggestions(&first_candidate_text(&text)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_model() {
        let suggester = GeminiLayoutSuggester::new(GenAiConfig {
            api_key: None,
            model: "gemini-2.0-flash".into(),
            base_url: "https://generativelanguage.googleapis.com/".into(),
        });
        assert_eq!(
            suggester.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn candidate_parts_are_concatenated() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[
            {"text":"{\"layoutSuggestions\":"},{"text":"[]}"}]}}]}"#;
        assert_eq!(first_candidate_text(body).unwrap(), r#"{"layoutSuggestions":[]}"#);
    }

    #[test]
    fn no_candidates_is_an_error() {
        assert!(first_candidate_text(r#"{"candidates":[]}"#).is_err());
        assert!(first_candidate_text(r#"{}"#).is_err());
    }

    #[actix_web::test]
    async fn missing_key_fails_without_calling_out() {
        let suggester = GeminiLayoutSuggester::new(GenAiConfig {
            api_key: None,
            model: "gemini-2.0-flash".into(),
            base_url: "http://127.0.0.1:9".into(),
        });
        let input = LayoutSuggestionInput {
            product_name: "Leite".into(),
            product_description: "UHT".into(),
            price: 4.99,
            discount: None,
            display_size: "2.9 inch".into(),
            resolution: "296x128".into(),
            essential_information: vec![],
            constraints: "none".into(),
        };
        let err = suggester.suggest(&input).await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
