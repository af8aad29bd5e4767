//! Google Gemini `generateContent` client

use super::{GenerationError, TextGenerator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model: model.into(),
            base_url: GEMINI_API_URL.to_string(),
        })
    }

    /// Point the client at another endpoint (local mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini");

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api(status.as_u16(), error_text));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.without_url().to_string()))?;

        first_candidate_text(body)
    }
}

/// Concatenated text parts of the first candidate
fn first_candidate_text(body: GenerateResponse) -> Result<String, GenerationError> {
    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_parts_are_joined() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "```json\n"}, {"text": "{\"a\": 1}\n```"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(first_candidate_text(body).unwrap(), "```json\n{\"a\": 1}\n```");
    }

    #[test]
    fn test_blocked_prompt_has_no_text() {
        // Safety-blocked prompts come back without candidates
        let body: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(matches!(
            first_candidate_text(body),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = GeminiClient::new(None, "gemini-1.5-flash").unwrap();
        let result = client.generate_content("prompt").await;
        assert!(matches!(result, Err(GenerationError::MissingApiKey)));
        assert_eq!(client.model(), "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_network_error_does_not_expose_api_key() {
        let client = GeminiClient::new(Some("SECRETKEY123".to_string()), "m")
            .unwrap()
            .with_base_url("http://127.0.0.1:9/models");

        let err = client.generate_content("prompt").await.unwrap_err();

        assert!(matches!(err, GenerationError::Network(_)));
        assert!(!err.to_string().contains("SECRETKEY123"), "leaked: {}", err);
    }
}
