//! OpenAI-compatible LLM session
//!
//! Chat Completions is stateless, so the session only remembers the model and
//! system prompt and sends both with every request.

use super::types::{ChatMessage, ChatRequest, ChatResponse, ErrorEnvelope, ResponseFormat};
use super::OpenAiSettings;
use async_trait::async_trait;
use moderation_application::ports::llm_gateway::{GatewayError, LlmSession};
use moderation_domain::core::string::truncate;
use moderation_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct OpenAiSession {
    client: reqwest::Client,
    settings: Arc<OpenAiSettings>,
    model: Model,
    system_prompt: Option<String>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        settings: Arc<OpenAiSettings>,
        model: Model,
        system_prompt: Option<String>,
    ) -> Self {
        Self {
            client,
            settings,
            model,
            system_prompt,
        }
    }

    fn build_request(&self, content: &str) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(prompt) = self.system_prompt.as_deref().filter(|p| !p.is_empty()) {
            messages.push(ChatMessage::system(prompt));
        }
        messages.push(ChatMessage::user(content));

        ChatRequest {
            model: self.model.to_string(),
            messages,
            temperature: self.settings.temperature,
            response_format: Some(ResponseFormat::json_object()),
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request = self.build_request(content);
        let url = self.settings.chat_completions_url();

        debug!(model = %self.model, url = %url, "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.settings.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, self.settings.timeout))?;

        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("not a chat completion: {}", e)))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                "Chat completion usage"
            );
        }

        parsed
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| GatewayError::InvalidResponse("response has no content".to_string()))
    }
}

fn map_reqwest_error(error: reqwest::Error, timeout: Duration) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout)
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

/// Message from an OpenAI error envelope, or the raw body trimmed down.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| truncate(body.trim(), 200))
}
