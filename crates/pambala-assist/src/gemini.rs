//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Sends one prompt per call and reads the text of the first candidate.

use async_trait::async_trait;
use pambala_core::ProductCategory;
use serde::Deserialize;
use tracing::debug;

use crate::config::AssistConfig;
use crate::error::{AssistError, AssistResult};
use crate::generator::{prompt, DescriptionGenerator};

/// Client for a single Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

/// Subset of the `generateContent` response we read.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .reduce(|a, b| a + &b)
            .filter(|t| !t.trim().is_empty())
    }
}

impl GeminiClient {
    /// Creates a client from configuration.
    ///
    /// ## Errors
    /// - `GenerationUnavailable` if no API key is configured
    /// - `Request` if the HTTP client cannot be built
    pub fn from_config(config: &AssistConfig) -> AssistResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AssistError::GenerationUnavailable(format!(
                "{} is not set",
                crate::config::API_KEY_ENV
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Sends `prompt` and returns the generated text.
    pub async fn generate_text(&self, prompt: &str) -> AssistResult<String> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        debug!(model = %self.model, "Requesting description");

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.endpoint, self.model
            ))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text().ok_or(AssistError::EmptyResponse)
    }

    /// Ensure the response has a success status code.
    async fn ensure_success(response: reqwest::Response) -> AssistResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AssistError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiClient {
    async fn generate(&self, name: &str, category: ProductCategory) -> AssistResult<String> {
        self.generate_text(&prompt(name, category)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{describe, ERROR_PLACEHOLDER};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(endpoint: &str) -> AssistConfig {
        AssistConfig {
            endpoint: endpoint.to_string(),
            model: "test-model".to_string(),
            timeout_secs: 5,
            api_key: Some("k-123".to_string()),
        }
    }

    #[test]
    fn test_requires_api_key() {
        let mut cfg = config("http://localhost");
        cfg.api_key = None;
        assert!(matches!(
            GeminiClient::from_config(&cfg),
            Err(AssistError::GenerationUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_reads_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(query_param("key", "k-123"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt("Ténis", ProductCategory::Footwear) }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "Passos leves, " }, { "text": "estilo firme." }] } },
                    { "content": { "parts": [{ "text": "ignorado" }] } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::from_config(&config(&server.uri())).unwrap();
        let text = client.generate("Ténis", ProductCategory::Footwear).await.unwrap();
        assert_eq!(text, "Passos leves, estilo firme.");
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::from_config(&config(&server.uri())).unwrap();
        assert!(matches!(
            client.generate_text("x").await,
            Err(AssistError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_api_error_becomes_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = GeminiClient::from_config(&config(&server.uri())).unwrap();
        match client.generate_text("x").await {
            Err(AssistError::Api { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key not valid");
            }
            other => panic!("expected Api error, got {:?}", other),
        }

        let text = describe(&client, "x", ProductCategory::Beauty).await;
        assert_eq!(text, ERROR_PLACEHOLDER);
    }
}
