// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini REST API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication and transient error retry for `generateContent` and
//! `batchEmbedContents`.

use std::time::Duration;

use docent_core::DocentError;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, BatchEmbedRequest, BatchEmbedResponse, GenerateContentRequest,
    GenerateContentResponse,
};

/// Default API root.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for Gemini API communication.
///
/// Manages the API key header, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    max_retries: u32,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Google API key, sent as `x-goog-api-key`
    /// * `base_url` - API root, e.g. [`API_BASE_URL`]
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, DocentError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                DocentError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DocentError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            max_retries: 1,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sets how many times a transient failure is retried.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Calls `models/{model}:generateContent`.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, DocentError> {
        let url = self.model_url(model, "generateContent");
        self.post_json(&url, request).await
    }

    /// Calls `models/{model}:batchEmbedContents`.
    pub async fn batch_embed_contents(
        &self,
        model: &str,
        request: &BatchEmbedRequest,
    ) -> Result<BatchEmbedResponse, DocentError> {
        let url = self.model_url(model, "batchEmbedContents");
        self.post_json(&url, request).await
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{method}", self.base_url, bare_model_name(model))
    }

    /// POSTs a JSON body and decodes the JSON response.
    ///
    /// On transient errors (429, 500, 503), retries after a 1-second delay.
    async fn post_json<Req, Resp>(&self, url: &str, body: &Req) -> Result<Resp, DocentError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying Gemini request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(|e| DocentError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "Gemini response received");

            if status.is_success() {
                let text = response.text().await.map_err(|e| DocentError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&text).map_err(|e| DocentError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let text = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(DocentError::provider(format!(
                    "API returned {status}: {text}"
                )));
                continue;
            }

            // Non-transient error or exhausted retries.
            let message = match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(api_err) => format!(
                    "Gemini API error ({} {}): {}",
                    api_err.error.code, api_err.error.status, api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {text}"),
            };
            return Err(DocentError::provider(message));
        }

        Err(last_error
            .unwrap_or_else(|| DocentError::provider("Gemini request failed after retries")))
    }
}

/// Strips the `models/` prefix some configurations carry.
pub fn bare_model_name(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, EmbedContentRequest};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new("test-api-key", base_url, Duration::from_secs(5)).unwrap()
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), "Hello")],
            generation_config: None,
        }
    }

    fn text_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2},
            "modelVersion": "gemini-2.0-flash"
        })
    }

    #[test]
    fn bare_model_name_strips_prefix() {
        assert_eq!(bare_model_name("models/embedding-001"), "embedding-001");
        assert_eq!(bare_model_name("gemini-2.0-flash"), "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Hi there!")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .generate_content("gemini-2.0-flash", &test_request())
            .await
            .unwrap();
        assert_eq!(result.first_text().as_deref(), Some("Hi there!"));
        assert_eq!(result.usage_metadata.unwrap().prompt_token_count, 3);
    }

    #[tokio::test]
    async fn generate_content_retries_on_429() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("After retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .generate_content("gemini-2.0-flash", &test_request())
            .await
            .unwrap();
        assert_eq!(result.first_text().as_deref(), Some("After retry"));
    }

    #[tokio::test]
    async fn generate_content_fails_on_400_with_api_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content("gemini-2.0-flash", &test_request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("INVALID_ARGUMENT"), "got: {err}");
        assert!(err.contains("API key not valid"), "got: {err}");
    }

    #[tokio::test]
    async fn exhausts_retries_on_503() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content("gemini-2.0-flash", &test_request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("503"), "got: {err}");
    }

    #[tokio::test]
    async fn zero_retries_makes_one_attempt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri()).with_max_retries(0);
        assert!(
            client
                .generate_content("gemini-2.0-flash", &test_request())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content("gemini-2.0-flash", &test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, DocentError::Provider { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[tokio::test]
    async fn batch_embed_uses_bare_model_path_and_api_key_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/embedding-001:batchEmbedContents"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embeddings": [{"values": [0.1, 0.2]}, {"values": [0.3, 0.4]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = BatchEmbedRequest {
            requests: ["a", "b"]
                .iter()
                .map(|t| EmbedContentRequest {
                    model: "models/embedding-001".into(),
                    content: Content::text(None, *t),
                    task_type: "RETRIEVAL_DOCUMENT",
                })
                .collect(),
        };
        let result = client
            .batch_embed_contents("models/embedding-001", &request)
            .await
            .unwrap();
        assert_eq!(result.embeddings.len(), 2);
        assert_eq!(result.embeddings[1].values, vec![0.3, 0.4]);
    }
}
