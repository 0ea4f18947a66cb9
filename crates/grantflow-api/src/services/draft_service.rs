//! AI draft generation via an external completion provider.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

/// Request timeout for completion provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion provider settings.
#[derive(Clone, Default)]
pub struct DraftConfig {
    /// Provider API base URL, e.g. `https://api.ai.example`.
    pub api_base: String,
    /// Provider API key. Drafting is unavailable without it.
    pub api_key: Option<String>,
    /// Model identifier to request.
    pub model: String,
}

impl std::fmt::Debug for DraftConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Service for generating application drafts.
#[derive(Clone)]
pub struct DraftService {
    http: reqwest::Client,
    config: DraftConfig,
}

impl DraftService {
    /// Create a new draft service.
    #[must_use]
    pub fn new(config: DraftConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { http, config }
    }

    /// Generate a draft for the given prompt.
    ///
    /// Returns the provider's text verbatim. Fails with
    /// `ServiceUnavailable` when no API key is configured.
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            ApiError::ServiceUnavailable("Draft generation is not configured".to_string())
        })?;

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.config.api_base))
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.config.model,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Completion request failed: {}", e);
                ApiError::ServiceUnavailable("Draft provider unreachable".to_string())
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Completion request rejected");
            return Err(ApiError::ServiceUnavailable(
                "Draft provider rejected the request".to_string(),
            ));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Malformed completion response: {}", e);
            ApiError::ServiceUnavailable("Draft provider returned bad data".to_string())
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                ApiError::ServiceUnavailable("Draft provider returned no choices".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_debug_redacts_api_key() {
        let config = DraftConfig {
            api_base: "https://api.ai.example".to_string(),
            api_key: Some("sk-secret".to_string()),
            model: "gpt-4o-mini".to_string(),
        };

        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("gpt-4o-mini"));
    }

    #[test]
    fn completion_response_parses() {
        let body = r#"{
            "choices": [{ "message": { "role": "assistant", "content": "Draft text" } }]
        }"#;

        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Draft text");
    }

    #[tokio::test]
    async fn missing_api_key_is_unavailable() {
        let service = DraftService::new(DraftConfig {
            api_base: "https://api.ai.example".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
        });

        let result = service.generate("prompt").await;
        assert!(matches!(result, Err(ApiError::ServiceUnavailable(_))));
    }
}
