//! Decision policy: the rule selecting auto-approval vs. human review.
//!
//! Pure domain logic: no I/O, so the whole rule can be checked as a table.

use crate::assessment::ViolationAssessment;
use serde::{Deserialize, Serialize};

/// Outcome of evaluating an assessment against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// No violation: approve without asking anyone.
    AutoApprove,
    /// Possible violation: a human must pick the action.
    NeedsReview,
}

/// Auto-approve only content the oracle found no violation in.
///
/// Severity, confidence and the oracle's own recommendation do not affect
/// the outcome: any category other than `none` goes to a human.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionPolicy;

impl DecisionPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, assessment: &ViolationAssessment) -> ReviewDecision {
        if assessment.is_violation() {
            ReviewDecision::NeedsReview
        } else {
            ReviewDecision::AutoApprove
        }
    }
}

/// What to do with an item whose classification call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleFailurePolicy {
    /// Send the item to a human with no assessment attached.
    #[default]
    Review,
    /// Record the item as deferred without prompting anyone.
    Defer,
}

impl std::str::FromStr for OracleFailurePolicy {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "review" => Ok(OracleFailurePolicy::Review),
            "defer" => Ok(OracleFailurePolicy::Defer),
            _ => Err(crate::core::error::DomainError::unknown(
                "oracle failure policy",
                s,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{RecommendedAction, SeverityLevel, ViolationCategory};

    fn assessment(
        category: ViolationCategory,
        severity: SeverityLevel,
        confidence: f64,
        action: RecommendedAction,
    ) -> ViolationAssessment {
        ViolationAssessment::new(category, severity, confidence, "test", action).unwrap()
    }

    #[test]
    fn test_decision_table_over_every_category() {
        let policy = DecisionPolicy::new();
        for category in ViolationCategory::ALL {
            let expected = if category == ViolationCategory::None {
                ReviewDecision::AutoApprove
            } else {
                ReviewDecision::NeedsReview
            };
            let decision = policy.decide(&assessment(
                category,
                SeverityLevel::Medium,
                0.5,
                RecommendedAction::FlagForReview,
            ));
            assert_eq!(decision, expected, "category {category}");
        }
    }

    #[test]
    fn test_none_category_ignores_other_fields() {
        let policy = DecisionPolicy::new();
        for severity in SeverityLevel::ALL {
            for action in RecommendedAction::ALL {
                for confidence in [0.0, 0.5, 1.0] {
                    let decision = policy.decide(&assessment(
                        ViolationCategory::None,
                        severity,
                        confidence,
                        action,
                    ));
                    assert_eq!(decision, ReviewDecision::AutoApprove);
                }
            }
        }
    }

    #[test]
    fn test_low_severity_violation_still_needs_review() {
        let decision = DecisionPolicy::new().decide(&assessment(
            ViolationCategory::Spam,
            SeverityLevel::Low,
            0.99,
            RecommendedAction::Approve,
        ));
        assert_eq!(decision, ReviewDecision::NeedsReview);
    }

    #[test]
    fn test_oracle_failure_policy_parse() {
        assert_eq!("review".parse::<OracleFailurePolicy>().unwrap(), OracleFailurePolicy::Review);
        assert_eq!("DEFER".parse::<OracleFailurePolicy>().unwrap(), OracleFailurePolicy::Defer);
        assert!("retry".parse::<OracleFailurePolicy>().is_err());
        assert_eq!(OracleFailurePolicy::default(), OracleFailurePolicy::Review);
    }
}
