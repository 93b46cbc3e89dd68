//! Offline classification oracle backed by canned assessments

use async_trait::async_trait;
use moderation_application::ports::classification_oracle::{ClassificationOracle, OracleError};
use moderation_domain::{
    ContentItem, RecommendedAction, SeverityLevel, ViolationAssessment, ViolationCategory,
};
use std::collections::BTreeMap;
use tracing::debug;

use super::file::ContentFixture;

const DEFAULT_CONFIDENCE: f64 = 0.9;
const DEFAULT_EXPLANATION: &str = "No policy violations detected in this content.";

/// [`ClassificationOracle`] that looks assessments up by content id.
///
/// Ids listed as failures return [`OracleError::Unavailable`]; unknown ids
/// get a clean assessment (none / low / 0.9 / approve).
#[derive(Debug, Clone, Default)]
pub struct FixtureClassificationOracle {
    assessments: BTreeMap<String, ViolationAssessment>,
    failures: BTreeMap<String, String>,
}

impl FixtureClassificationOracle {
    pub fn new(assessments: BTreeMap<String, ViolationAssessment>) -> Self {
        Self {
            assessments,
            failures: BTreeMap::new(),
        }
    }

    pub fn from_fixture(fixture: &ContentFixture) -> Self {
        Self {
            assessments: fixture.assessments.clone(),
            failures: fixture.failures.clone(),
        }
    }

    pub fn with_failure(mut self, id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(id.into(), reason.into());
        self
    }

    fn default_assessment() -> Result<ViolationAssessment, OracleError> {
        ViolationAssessment::new(
            ViolationCategory::None,
            SeverityLevel::Low,
            DEFAULT_CONFIDENCE,
            DEFAULT_EXPLANATION,
            RecommendedAction::Approve,
        )
        .map_err(OracleError::from)
    }
}

#[async_trait]
impl ClassificationOracle for FixtureClassificationOracle {
    async fn assess(&self, item: &ContentItem) -> Result<ViolationAssessment, OracleError> {
        if let Some(reason) = self.failures.get(&item.id) {
            return Err(OracleError::Unavailable(reason.clone()));
        }

        match self.assessments.get(&item.id) {
            Some(assessment) => {
                debug!("Canned assessment for {}", item.id);
                Ok(assessment.clone())
            }
            None => {
                debug!("No canned assessment for {}, using default", item.id);
                Self::default_assessment()
            }
        }
    }
}
