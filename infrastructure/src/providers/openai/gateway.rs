//! OpenAI-compatible LLM Gateway implementation

use super::OpenAiSettings;
use super::session::OpenAiSession;
use async_trait::async_trait;
use moderation_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use moderation_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Headroom so the oracle's own deadline normally fires before the client's.
const CLIENT_TIMEOUT_SLACK: Duration = Duration::from_secs(2);

/// LLM Gateway for any `/chat/completions` endpoint speaking the OpenAI dialect
pub struct OpenAiGateway {
    client: reqwest::Client,
    settings: Arc<OpenAiSettings>,
}

impl OpenAiGateway {
    /// Create a gateway; the client timeout bounds each request.
    pub fn new(settings: OpenAiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout + CLIENT_TIMEOUT_SLACK)
            .user_agent(concat!("content-moderation/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        info!(base_url = %settings.base_url, "OpenAiGateway initialized");

        Ok(Self {
            client,
            settings: Arc::new(settings),
        })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.settings),
            model.clone(),
            None,
        )))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.settings),
            model.clone(),
            Some(system_prompt.to_string()),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_session_keeps_model() {
        let gateway = OpenAiGateway::new(OpenAiSettings {
            base_url: "http://localhost:1".to_string(),
            api_key: "sk-test".to_string(),
            temperature: 0.0,
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let session = gateway
            .create_session_with_system_prompt(&Model::Gpt41Mini, "classify")
            .await
            .unwrap();
        assert_eq!(session.model(), &Model::Gpt41Mini);
    }
}
