//! LLM-backed classification oracle.
//!
//! Sends one content item to a model and validates the reply against the
//! assessment schema. A reply that does not validate is an error, never a
//! default assessment.

use crate::config::OracleParams;
use crate::ports::classification_oracle::{ClassificationOracle, OracleError};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use moderation_domain::core::string::truncate;
use moderation_domain::{
    parse_assessment_response, ContentItem, ModerationPromptTemplate, ViolationAssessment,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// [`ClassificationOracle`] that prompts an [`LlmGateway`].
///
/// Each call opens a fresh session so items never see each other's content.
pub struct LlmClassificationOracle {
    gateway: Arc<dyn LlmGateway>,
    params: OracleParams,
}

impl LlmClassificationOracle {
    pub fn new(gateway: Arc<dyn LlmGateway>, params: OracleParams) -> Self {
        Self { gateway, params }
    }

    pub fn params(&self) -> &OracleParams {
        &self.params
    }

    async fn ask_model(&self, item: &ContentItem) -> Result<ViolationAssessment, OracleError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(
                &self.params.model,
                &ModerationPromptTemplate::classification_system(),
            )
            .await?;

        let prompt = ModerationPromptTemplate::classification_prompt(item);
        let response = session.send(&prompt).await?;
        debug!(
            "Oracle reply for {}: {}",
            item.id,
            truncate(&response, 200)
        );

        parse_assessment_response(&response).map_err(|e| {
            warn!("Rejected oracle reply for {}: {}", item.id, e);
            OracleError::from(e)
        })
    }
}

#[async_trait]
impl ClassificationOracle for LlmClassificationOracle {
    async fn assess(&self, item: &ContentItem) -> Result<ViolationAssessment, OracleError> {
        match self.params.timeout {
            Some(limit) => tokio::time::timeout(limit, self.ask_model(item))
                .await
                .map_err(|_| OracleError::Timeout(limit))?,
            None => self.ask_model(item).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{GatewayError, LlmSession};
    use moderation_domain::{AssessmentError, Model, RecommendedAction, ViolationCategory};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockSession {
        model: Model,
        responses: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
        prompts: Arc<Mutex<Vec<String>>>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl LlmSession for MockSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, content: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(content.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    struct MockGateway {
        responses: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
        prompts: Arc<Mutex<Vec<String>>>,
        system_prompts: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl MockGateway {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(VecDeque::from(responses))),
                prompts: Arc::new(Mutex::new(Vec::new())),
                system_prompts: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn create_session(
            &self,
            model: &Model,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(MockSession {
                model: model.clone(),
                responses: self.responses.clone(),
                prompts: self.prompts.clone(),
                delay: self.delay,
            }))
        }

        async fn create_session_with_system_prompt(
            &self,
            model: &Model,
            system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            self.system_prompts
                .lock()
                .unwrap()
                .push(system_prompt.to_string());
            self.create_session(model).await
        }
    }

    fn spam_reply() -> String {
        r#"Here you go: {"category": "spam", "severity": "medium", "confidence": 0.91,
            "explanation": "Unsolicited promotion", "recommended_action": "restrict"}"#
            .to_string()
    }

    fn item() -> ContentItem {
        ContentItem::text_post("post_9", "user_1", "BUY NOW at example.test")
    }

    #[tokio::test]
    async fn test_assess_parses_reply() {
        let gateway = Arc::new(MockGateway::new(vec![Ok(spam_reply())]));
        let oracle = LlmClassificationOracle::new(gateway.clone(), OracleParams::default());

        let assessment = oracle.assess(&item()).await.unwrap();
        assert_eq!(assessment.category(), ViolationCategory::Spam);
        assert_eq!(assessment.recommended_action(), RecommendedAction::Restrict);

        let prompts = gateway.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("BUY NOW at example.test"));
        assert_eq!(gateway.system_prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assess_rejects_unknown_category() {
        let reply = r#"{"category": "rudeness", "severity": "low", "confidence": 0.5,
            "explanation": "x", "recommended_action": "warn"}"#;
        let gateway = Arc::new(MockGateway::new(vec![Ok(reply.to_string())]));
        let oracle = LlmClassificationOracle::new(gateway, OracleParams::default());

        let err = oracle.assess(&item()).await.unwrap_err();
        assert!(matches!(
            err,
            OracleError::InvalidResponse(AssessmentError::InvalidToken { .. })
        ));
    }

    #[tokio::test]
    async fn test_assess_rejects_prose() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("I think it's fine.".to_string())]));
        let oracle = LlmClassificationOracle::new(gateway, OracleParams::default());

        let err = oracle.assess(&item()).await.unwrap_err();
        assert_eq!(err, OracleError::InvalidResponse(AssessmentError::NoJsonObject));
    }

    #[tokio::test]
    async fn test_assess_maps_transport_error() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::ConnectionError(
            "refused".to_string(),
        ))]));
        let oracle = LlmClassificationOracle::new(gateway, OracleParams::default());

        let err = oracle.assess(&item()).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().contains("refused"));
    }

    #[tokio::test]
    async fn test_assess_reports_provider_timeout_as_timeout() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Timeout(
            Duration::from_secs(30),
        ))]));
        let oracle = LlmClassificationOracle::new(gateway, OracleParams::default());

        let err = oracle.assess(&item()).await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
        assert_eq!(err.to_string(), "timed out after 30s");
    }

    #[tokio::test(start_paused = true)]
    async fn test_assess_times_out() {
        let gateway = Arc::new(
            MockGateway::new(vec![Ok(spam_reply())]).with_delay(Duration::from_secs(60)),
        );
        let params = OracleParams::default().with_timeout(Some(Duration::from_secs(5)));
        let oracle = LlmClassificationOracle::new(gateway, params);

        let err = oracle.assess(&item()).await.unwrap_err();
        assert_eq!(err, OracleError::Timeout(Duration::from_secs(5)));
    }
}
