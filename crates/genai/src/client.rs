//! Gemini API client.
//!
//! Thin wrapper over the REST `generateContent` endpoint. Higher-level
//! stylist and image helpers live in [`crate::stylist`] and [`crate::imagery`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::GeminiConfig;
use crate::error::{ApiErrorResponse, GeminiError};
use crate::types::{GenerateContentRequest, GenerateContentResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    base_url: String,
    chat_model: String,
    image_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.inner.base_url)
            .field("chat_model", &self.inner.chat_model)
            .field("image_model", &self.inner.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Config` if the API key contains invalid header
    /// characters or the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| GeminiError::Config("API key contains invalid characters".to_string()))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GeminiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                chat_model: config.chat_model.clone(),
                image_model: config.image_model.clone(),
            }),
        })
    }

    #[must_use]
    pub fn chat_model(&self) -> &str {
        &self.inner.chat_model
    }

    #[must_use]
    pub fn image_model(&self) -> &str {
        &self.inner.image_model
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.inner.base_url)
    }

    /// Call `generateContent` on the given model.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error response.
    #[instrument(skip(self, model, request), fields(model = %model))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await?;

        let parsed = Self::handle_response(response).await?;
        if let Some(usage) = parsed.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }
        Ok(parsed)
    }

    async fn handle_response(
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GeminiError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return GeminiError::Unauthorized("API key rejected".to_string());
        }

        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => GeminiError::Api {
                    status: api_error.error.status,
                    message: api_error.error.message,
                },
                Err(_) => GeminiError::Api {
                    status: status.as_u16().to_string(),
                    message: body,
                },
            },
            Err(e) => GeminiError::Http(e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use httpmock::prelude::*;
    use secrecy::SecretString;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig::new(SecretString::from("test-key")).with_base_url(server.base_url());
        GeminiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_generate_content_sends_key_and_parses() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-2.5-flash:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .body_contains("\"hello\"");
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "Hi there"}]}}]
                }));
            })
            .await;

        let client = client_for(&server);
        let response = client
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::from_text("hello"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text().as_deref(), Some("Hi there"));
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).header("Retry-After", "17");
            })
            .await;

        let err = client_for(&server)
            .generate_content("m", &GenerateContentRequest::from_text("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::RateLimited(17)));
    }

    #[tokio::test]
    async fn test_forbidden_is_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(403);
            })
            .await;

        let err = client_for(&server)
            .generate_content("m", &GenerateContentRequest::from_text("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_api_error_body_is_parsed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(400).json_body(json!({
                    "error": {"code": 400, "message": "bad prompt", "status": "INVALID_ARGUMENT"}
                }));
            })
            .await;

        let err = client_for(&server)
            .generate_content("m", &GenerateContentRequest::from_text("x"))
            .await
            .unwrap_err();
        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, "INVALID_ARGUMENT");
                assert_eq!(message, "bad prompt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_key_is_config_error() {
        let config = GeminiConfig::new(SecretString::from("bad\nkey"));
        assert!(matches!(GeminiClient::new(&config), Err(GeminiError::Config(_))));
    }

    #[test]
    fn test_gemini_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<GeminiClient>();
    }

    #[test]
    fn test_gemini_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeminiClient>();
    }
}
