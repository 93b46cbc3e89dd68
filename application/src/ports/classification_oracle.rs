//! Classification oracle port
//!
//! The oracle turns one [`ContentItem`] into a [`ViolationAssessment`]. It is
//! the only place the pipeline reaches out to a model; everything it returns
//! has already passed strict schema validation.

use async_trait::async_trait;
use moderation_domain::{AssessmentError, ContentItem, ViolationAssessment};
use std::time::Duration;
use thiserror::Error;

use super::llm_gateway::GatewayError;

/// Why an item could not be classified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid response: {0}")]
    InvalidResponse(#[from] AssessmentError),

    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl OracleError {
    /// Short failure kind for logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            OracleError::Transport(_) => "transport",
            OracleError::Timeout(_) => "timeout",
            OracleError::InvalidResponse(_) => "schema",
            OracleError::Unavailable(_) => "unavailable",
        }
    }
}

impl From<GatewayError> for OracleError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::InvalidResponse(msg) => {
                OracleError::InvalidResponse(AssessmentError::MalformedJson(msg))
            }
            GatewayError::Timeout(limit) => OracleError::Timeout(limit),
            other => OracleError::Transport(other.to_string()),
        }
    }
}

/// Port for classifying content.
///
/// One call per item, no retries. Implementations:
/// - `LlmClassificationOracle` (application): prompts an [`LlmGateway`](super::llm_gateway::LlmGateway)
/// - `FixtureClassificationOracle` (infrastructure): canned assessments for offline runs
#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    async fn assess(&self, item: &ContentItem) -> Result<ViolationAssessment, OracleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(OracleError::Transport("x".into()).kind(), "transport");
        assert_eq!(OracleError::Timeout(Duration::from_secs(5)).kind(), "timeout");
        assert_eq!(
            OracleError::InvalidResponse(AssessmentError::NoJsonObject).kind(),
            "schema"
        );
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            OracleError::Timeout(Duration::from_secs(30)).to_string(),
            "timed out after 30s"
        );
        assert_eq!(
            OracleError::Timeout(Duration::from_millis(250)).to_string(),
            "timed out after 250ms"
        );
    }

    #[test]
    fn test_from_gateway_error() {
        let error: OracleError = GatewayError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(error, OracleError::Timeout(Duration::from_secs(30)));
        assert_eq!(error.kind(), "timeout");

        let error: OracleError = GatewayError::ConnectionError("refused".into()).into();
        assert_eq!(error.kind(), "transport");

        let error: OracleError = GatewayError::InvalidResponse("no choices".into()).into();
        assert_eq!(error.kind(), "schema");
    }
}
