//! Chat-completion port and the xAI Grok client.
//!
//! Grok speaks the OpenAI chat-completions protocol:
//! `POST {base}/v1/chat/completions` with a message list, answer in
//! `choices[0].message.content`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TextModelConfig;
use crate::AiError;

/// Sampling temperature used for all creative text.
const TEMPERATURE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Anything that can turn a conversation into a single reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AiError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
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
    content: Option<String>,
}

/// Pull the first choice's text out of a completion response.
fn first_content(response: CompletionResponse) -> Result<String, AiError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AiError::InvalidResponse("No content in completion response".into()))
}

// ---------------------------------------------------------------------------
// GrokClient
// ---------------------------------------------------------------------------

/// HTTP client for the xAI chat-completions endpoint.
#[derive(Clone)]
pub struct GrokClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GrokClient {
    pub fn new(config: &TextModelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for GrokClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AiError> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        first_content(parsed)
    }
}

/// Stand-in used when no API key is configured.
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, AiError> {
        Err(AiError::NotConfigured("Text generation"))
    }
}

/// Return the response unchanged on 2xx, otherwise an [`AiError::Api`]
/// carrying the status and body text.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(AiError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let json = serde_json::to_value(ChatMessage::system("be brief")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "be brief"}));
    }

    #[test]
    fn first_choice_content_is_returned() {
        let response: CompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "cmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hello"}},
                {"index": 1, "message": {"role": "assistant", "content": "Ignored"}}
            ]
        }))
        .unwrap();
        assert_eq!(first_content(response).unwrap(), "Hello");
    }

    #[test]
    fn empty_choices_are_invalid() {
        let response: CompletionResponse =
            serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert_matches!(first_content(response), Err(AiError::InvalidResponse(_)));
    }

    #[test]
    fn blank_content_is_invalid() {
        let response: CompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "   "}}]
        }))
        .unwrap();
        assert_matches!(first_content(response), Err(AiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn disabled_generator_reports_not_configured() {
        let result = DisabledTextGenerator
            .complete(&[ChatMessage::user("hi")])
            .await;
        assert_matches!(result, Err(AiError::NotConfigured(_)));
    }
}
