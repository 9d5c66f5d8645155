//! GeminiClient -- concrete [`TextGenerator`] for Google Gemini.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `x-goog-api-key` header.

use std::time::Duration;

use blueprint_core::explain::TextGenerator;
use blueprint_types::config::ExplainConfig;
use blueprint_types::error::ExplainError;
use secrecy::{ExposeSecret, SecretString};

use super::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Google Gemini text generator.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Generations can take a while; allow up to two minutes.
    const TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(api_key: SecretString, config: &ExplainConfig) -> Result<Self, ExplainError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| ExplainError::Failed(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

// No Debug derive: keeps the client out of accidental log output.

impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ExplainError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini request failed");
                ExplainError::Failed(format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Gemini returned an error");
            return Err(classify_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::Failed(format!("failed to parse response: {e}")))?;

        parsed
            .text()
            .ok_or_else(|| ExplainError::Failed("response contained no candidates".to_string()))
    }
}

/// Map an error response onto the caller-facing error kinds.
fn classify_error(status: u16, body: &str) -> ExplainError {
    let (message, status_name) = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(e) => (e.error.message, e.error.status),
        Err(_) => (body.to_string(), None),
    };

    let denied = matches!(
        status_name.as_deref(),
        Some("PERMISSION_DENIED" | "UNAUTHENTICATED")
    );
    if matches!(status, 401 | 403) || denied || message.contains("API key not valid") {
        return ExplainError::InvalidCredential;
    }
    ExplainError::Failed(format!("HTTP {status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(SecretString::from("test-key-not-real"), &ExplainConfig::default())
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key-not-real"))
            .and(body_partial_json(json!({ "contents": [{ "parts": [{ "text": "explain" }] }] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "It syncs leads." }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).generate("explain").await.unwrap();
        assert_eq!(text, "It syncs leads.");
    }

    #[tokio::test]
    async fn test_invalid_key_message_maps_to_invalid_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .mount(&server)
            .await;

        let err = client(&server).generate("explain").await.unwrap_err();
        assert!(matches!(err, ExplainError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client(&server).generate("explain").await.unwrap_err();
        match err {
            ExplainError::Failed(message) => assert!(message.contains("503")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_error_statuses() {
        assert!(matches!(classify_error(401, ""), ExplainError::InvalidCredential));
        assert!(matches!(classify_error(403, "denied"), ExplainError::InvalidCredential));
        assert!(matches!(classify_error(400, "bad prompt"), ExplainError::Failed(_)));
    }

    #[test]
    fn test_classify_error_reads_status_name() {
        let denied = json!({
            "error": { "code": 400, "message": "Permission denied on resource", "status": "PERMISSION_DENIED" }
        });
        assert!(matches!(
            classify_error(400, &denied.to_string()),
            ExplainError::InvalidCredential
        ));

        let invalid = json!({
            "error": { "code": 400, "message": "Invalid JSON payload", "status": "INVALID_ARGUMENT" }
        });
        match classify_error(400, &invalid.to_string()) {
            ExplainError::Failed(msg) => assert_eq!(msg, "HTTP 400: Invalid JSON payload"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_url_uses_configured_model() {
        let config = ExplainConfig {
            model: "gemini-2.0-flash".to_string(),
            endpoint: "https://proxy.example.com/".to_string(),
        };
        let client = GeminiClient::new(SecretString::from("k"), &config).unwrap();
        assert_eq!(
            client.url(),
            "https://proxy.example.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
