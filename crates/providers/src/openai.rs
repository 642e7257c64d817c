//! OpenAI chat-completions client.
//!
//! Speaks the `/chat/completions` wire contract over HTTPS JSON and returns
//! the first choice's message content as plain text. Timeout handling lives
//! here, not in the session core.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use kabeuchi_core::error::CompletionError;
use kabeuchi_core::provider::{CompletionClient, CompletionRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// A client for the OpenAI chat-completions endpoint.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against an explicit base URL (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %request.model, messages = request.messages.len(), "sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, "completion service returned error");
            // Prefer the service-reported message; fall back to the raw body.
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.map(|d| d.message))
                .unwrap_or(body);
            return Err(CompletionError::Api { status, message });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::MalformedResponse("no choices in response".into()))?;

        Ok(content)
    }
}

// --- Wire types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = OpenAiClient::with_base_url("sk-test", "http://localhost:9999/v1/");
        assert_eq!(client.base_url, "http://localhost:9999/v1");
        assert_eq!(client.name(), "openai");
    }

    #[test]
    fn parse_success_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"こんにちは！"}}]}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("こんにちは！")
        );
    }

    #[test]
    fn parse_response_with_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn parse_empty_choices() {
        let body = r#"{"choices":[]}"#;
        let parsed: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn parse_service_error_body() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.error.unwrap().message,
            "Incorrect API key provided"
        );
    }

    #[test]
    fn unparseable_error_body_tolerated() {
        let parsed: Result<ApiErrorResponse, _> = serde_json::from_str("<html>502</html>");
        assert!(parsed.is_err());
    }
}
