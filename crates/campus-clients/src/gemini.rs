//! Gemini HTTP client for text generation.
//!
//! Calls `v1beta/models/{model}:generateContent` and translates the response
//! into the provider-neutral [`Generation`].

use std::time::Duration;

use async_trait::async_trait;
use campus_core::config::GeminiConfig;
use campus_core::generation::{
    FinishReason, Generation, GenerationCandidate, GenerationError, PromptFeedback, TextGenerator,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Harm categories filtered on every request.
pub const HARM_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Threshold applied to every category in [`HARM_CATEGORIES`].
pub const BLOCK_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Gemini generation client.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

// ============================================================
// WIRE TYPES
// ============================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct TextPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
    #[serde(default)]
    prompt_feedback: Option<ResponsePromptFeedback>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ResponseCandidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<Value>,
}

#[derive(Debug, Deserialize, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ResponsePromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<Value>,
}

impl GenerateContentRequest {
    pub(crate) fn new(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![TextPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: BLOCK_THRESHOLD,
                })
                .collect(),
        }
    }
}

/// Translate a Gemini response into a [`Generation`].
pub(crate) fn into_generation(response: GenerateContentResponse) -> Generation {
    let candidates = response
        .candidates
        .into_iter()
        .map(|candidate| GenerationCandidate {
            finish_reason: FinishReason::parse(candidate.finish_reason.as_deref()),
            text: candidate
                .content
                .map(|content| {
                    content
                        .parts
                        .into_iter()
                        .filter_map(|part| part.text)
                        .collect::<String>()
                })
                .unwrap_or_default(),
            safety_ratings: candidate.safety_ratings,
        })
        .collect();

    let prompt_feedback = response
        .prompt_feedback
        .map(|feedback| PromptFeedback {
            block_reason: feedback.block_reason,
            safety_ratings: feedback.safety_ratings,
        })
        .unwrap_or_default();

    Generation {
        candidates,
        prompt_feedback,
    }
}

// ============================================================
// CLIENT
// ============================================================

impl GeminiClient {
    /// Create a new client with explicit settings.
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.trim_start_matches("models/").to_string(),
            api_key: api_key.to_string(),
            timeout_secs,
            client,
        }
    }

    /// Create a client from configuration. The API key must already be validated.
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.model,
            config.api_key.as_deref().map(str::trim).unwrap_or_default(),
            config.timeout_secs,
        )
    }

    fn model_url(&self) -> String {
        format!("{}/v1beta/models/{}", self.base_url, self.model)
    }

    fn map_transport(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout_secs)
        } else {
            GenerationError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError> {
        let request = GenerateContentRequest::new(prompt);

        let response = self
            .client
            .post(format!("{}:generateContent", self.model_url()))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout_secs)
            } else {
                GenerationError::Decode(e.to_string())
            }
        })?;

        debug!(
            model = %self.model,
            candidates = body.candidates.len(),
            "Received Gemini response"
        );

        Ok(into_generation(body))
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    /// Check that the model is reachable with the configured key.
    async fn health_check(&self) -> Result<bool, GenerationError> {
        let response = self
            .client
            .get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => Err(self.map_transport(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Generation {
        let response: GenerateContentResponse = serde_json::from_value(value).unwrap();
        into_generation(response)
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::new("Review this")).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Review this");

        let settings = body["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        for (setting, category) in settings.iter().zip(HARM_CATEGORIES) {
            assert_eq!(setting["category"], *category);
            assert_eq!(setting["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
        }
    }

    #[test]
    fn test_completed_response() {
        let generation = decode(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Looks " }, { "text": "fine." }] },
                "finishReason": "STOP",
                "safetyRatings": [{ "category": "HARM_CATEGORY_HARASSMENT", "probability": "NEGLIGIBLE" }]
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }));
        let candidate = generation.first().unwrap();
        assert_eq!(candidate.finish_reason, FinishReason::Stop);
        assert_eq!(candidate.text, "Looks fine.");
        assert_eq!(candidate.safety_ratings.len(), 1);
        assert!(generation.prompt_feedback.block_reason.is_none());
    }

    #[test]
    fn test_blocked_prompt_without_candidates() {
        let generation = decode(json!({
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [{ "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "HIGH" }]
            }
        }));
        assert!(generation.candidates.is_empty());
        assert_eq!(generation.prompt_feedback.block_reason.as_deref(), Some("SAFETY"));
        assert_eq!(
            generation.prompt_feedback.safety_ratings,
            vec![json!({ "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "HIGH" })]
        );
    }

    #[test]
    fn test_safety_candidate_without_content() {
        let generation = decode(json!({
            "candidates": [{ "finishReason": "SAFETY", "index": 0 }]
        }));
        let candidate = generation.first().unwrap();
        assert_eq!(candidate.finish_reason, FinishReason::Safety);
        assert!(candidate.text.is_empty());
    }

    #[test]
    fn test_empty_object_is_tolerated() {
        assert_eq!(decode(json!({})), Generation::default());
    }

    #[test]
    fn test_client_normalizes_urls() {
        let client = GeminiClient::new("https://example.test/", "models/gemini-pro", "k", 5);
        assert_eq!(client.model_url(), "https://example.test/v1beta/models/gemini-pro");
        assert_eq!(client.model_name(), "gemini-pro");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on localhost is closed on test machines.
        let client = GeminiClient::new("http://127.0.0.1:9", "gemini-pro", "k", 5);
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_) | GenerationError::Timeout(_)));
    }
}
