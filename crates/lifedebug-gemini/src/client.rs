// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Provides [`GeminiClient`] which handles URL construction, the
//! `x-goog-api-key` credential header, and error envelope decoding. Each call
//! is a single attempt; failures surface to the caller unchanged.

use std::time::Duration;

use lifedebug_core::LifeDebugError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - API key, or `None` to fail each call with a provider error
    /// * `base_url` - API root such as `https://generativelanguage.googleapis.com/v1beta`
    /// * `timeout` - Optional whole-request timeout
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, LifeDebugError> {
        lifedebug_security::validate_url(base_url)?;
        let client = lifedebug_security::build_secure_client(timeout)?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns true if a credential was resolved at construction.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_headers(&self) -> Result<HeaderMap, LifeDebugError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            LifeDebugError::provider(
                "Gemini API key not found. Set gemini.api_key in config or the GEMINI_API_KEY environment variable.",
            )
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(key).map_err(|e| {
                LifeDebugError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        Ok(headers)
    }

    /// Sends one `generateContent` request and returns the decoded response.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LifeDebugError> {
        let headers = self.auth_headers()?;
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| LifeDebugError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response.text().await.map_err(|e| LifeDebugError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(LifeDebugError::provider(error_message(status, &body)));
        }

        serde_json::from_str(&body).map_err(|e| LifeDebugError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Fetches model metadata. Used as a token-free reachability check.
    pub async fn get_model(&self, model: &str) -> Result<(), LifeDebugError> {
        let headers = self.auth_headers()?;
        let url = format!("{}/models/{model}", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| LifeDebugError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(LifeDebugError::provider(error_message(status, &body)))
    }
}

/// Formats a non-2xx response, preferring the decoded error envelope.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "Gemini API error {} ({}): {}",
            status.as_u16(),
            api_err.error.status,
            api_err.error.message
        ),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, Part};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-3-pro-preview";
    const GENERATE_PATH: &str = "/models/gemini-3-pro-preview:generateContent";

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(Some("test-api-key".into()), base_url, None).unwrap()
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part::text("Hello")],
            }],
            system_instruction: None,
            generation_config: None,
        }
    }

    fn text_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
        })
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Hi there!")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(MODEL, &test_request()).await.unwrap();

        assert_eq!(result.text().as_deref(), Some("Hi there!"));
        assert_eq!(result.usage_metadata.unwrap().prompt_token_count, 10);
    }

    #[tokio::test]
    async fn client_sends_key_header_and_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate_content(MODEL, &test_request()).await;
        assert!(result.is_ok(), "request should match: {result:?}");
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("ok")))
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/", server.uri()));
        assert!(client.generate_content(MODEL, &test_request()).await.is_ok());
    }

    #[tokio::test]
    async fn error_envelope_becomes_provider_error() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        });

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content(MODEL, &test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, LifeDebugError::Provider { .. }));
        let msg = err.to_string();
        assert!(msg.contains("INVALID_ARGUMENT"), "got: {msg}");
        assert!(msg.contains("API key not valid."), "got: {msg}");
    }

    #[tokio::test]
    async fn transient_status_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content(MODEL, &test_request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("503"), "got: {err}");
        assert!(err.contains("overloaded"), "got: {err}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content(MODEL, &test_request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("failed to parse API response"), "got: {err}");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("ok")))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(None, &server.uri(), None).unwrap();
        assert!(!client.has_api_key());
        let err = client
            .generate_content(MODEL, &test_request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("API key not found"), "got: {err}");
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let client = GeminiClient::new(Some(String::new()), "http://127.0.0.1:9", None).unwrap();
        assert!(!client.has_api_key());
    }

    #[test]
    fn plaintext_remote_base_url_is_rejected() {
        let result = GeminiClient::new(Some("k".into()), "http://example.com/v1beta", None);
        assert!(matches!(result, Err(LifeDebugError::Config(_))));
    }

    #[tokio::test]
    async fn get_model_reports_reachability() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models/gemini-3-pro-preview"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "models/gemini-3-pro-preview"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.get_model(MODEL).await.is_ok());
        assert!(client.get_model("no-such-model").await.is_err());
    }
}
