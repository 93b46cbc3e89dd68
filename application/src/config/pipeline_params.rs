//! Pipeline parameters: orchestrator behavior that is not domain policy.

use moderation_domain::OracleFailurePolicy;
use std::time::Duration;

/// Reviewer name used when none is configured
pub const DEFAULT_REVIEWER: &str = "Senior Moderator Johnson";

/// Moderation pipeline control parameters.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    /// Display name recorded for human decisions.
    pub reviewer: String,
    /// Fallback when the classification oracle fails for an item.
    pub on_oracle_failure: OracleFailurePolicy,
    /// Upper bound on waiting for one human decision. `None` waits forever.
    pub review_timeout: Option<Duration>,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            reviewer: DEFAULT_REVIEWER.to_string(),
            on_oracle_failure: OracleFailurePolicy::Review,
            review_timeout: None,
        }
    }
}

impl PipelineParams {
    pub fn new(reviewer: impl Into<String>) -> Self {
        Self {
            reviewer: reviewer.into(),
            ..Self::default()
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_oracle_failure_policy(mut self, policy: OracleFailurePolicy) -> Self {
        self.on_oracle_failure = policy;
        self
    }

    pub fn with_review_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.review_timeout = timeout;
        self
    }
}
