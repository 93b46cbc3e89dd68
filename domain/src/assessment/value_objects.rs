//! Assessment value objects
//!
//! Every token type here is a closed set: parsing an unknown token is an
//! error, never a fallback to a default variant.

use super::parsing::{AssessmentError, RawAssessment};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Policy area a piece of content may violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    None,
    Harassment,
    HateSpeech,
    Violence,
    Nudity,
    Misinformation,
    Spam,
    SelfHarm,
    Copyright,
    Other,
}

impl ViolationCategory {
    pub const ALL: [ViolationCategory; 10] = [
        ViolationCategory::None,
        ViolationCategory::Harassment,
        ViolationCategory::HateSpeech,
        ViolationCategory::Violence,
        ViolationCategory::Nudity,
        ViolationCategory::Misinformation,
        ViolationCategory::Spam,
        ViolationCategory::SelfHarm,
        ViolationCategory::Copyright,
        ViolationCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationCategory::None => "none",
            ViolationCategory::Harassment => "harassment",
            ViolationCategory::HateSpeech => "hate_speech",
            ViolationCategory::Violence => "violence",
            ViolationCategory::Nudity => "nudity",
            ViolationCategory::Misinformation => "misinformation",
            ViolationCategory::Spam => "spam",
            ViolationCategory::SelfHarm => "self_harm",
            ViolationCategory::Copyright => "copyright",
            ViolationCategory::Other => "other",
        }
    }

    pub fn is_violation(&self) -> bool {
        *self != ViolationCategory::None
    }
}

impl std::fmt::Display for ViolationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ViolationCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == token)
            .ok_or_else(|| DomainError::unknown("violation category", s))
    }
}

/// How serious a violation is. Variants are declared in ascending order,
/// so `Ord` compares by seriousness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Low,
        SeverityLevel::Medium,
        SeverityLevel::High,
        SeverityLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Medium => "medium",
            SeverityLevel::High => "high",
            SeverityLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SeverityLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == token)
            .ok_or_else(|| DomainError::unknown("severity level", s))
    }
}

/// What the oracle suggests doing with the content.
///
/// `FlagForReview` only ever appears here, as a recommendation; it is not a
/// terminal [`ModerationAction`](crate::moderation::ModerationAction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Approve,
    FlagForReview,
    Warn,
    Restrict,
    Remove,
}

impl RecommendedAction {
    pub const ALL: [RecommendedAction; 5] = [
        RecommendedAction::Approve,
        RecommendedAction::FlagForReview,
        RecommendedAction::Warn,
        RecommendedAction::Restrict,
        RecommendedAction::Remove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::Approve => "approve",
            RecommendedAction::FlagForReview => "flag_for_review",
            RecommendedAction::Warn => "warn",
            RecommendedAction::Restrict => "restrict",
            RecommendedAction::Remove => "remove",
        }
    }
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RecommendedAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == token)
            .ok_or_else(|| DomainError::unknown("recommended action", s))
    }
}

/// The oracle's structured judgment about one content item.
///
/// Only constructible through [`ViolationAssessment::new`] or validated
/// deserialization, so a value in hand always has a confidence in
/// `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssessment")]
pub struct ViolationAssessment {
    category: ViolationCategory,
    severity: SeverityLevel,
    confidence: f64,
    explanation: String,
    recommended_action: RecommendedAction,
}

impl ViolationAssessment {
    pub fn new(
        category: ViolationCategory,
        severity: SeverityLevel,
        confidence: f64,
        explanation: impl Into<String>,
        recommended_action: RecommendedAction,
    ) -> Result<Self, AssessmentError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AssessmentError::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            category,
            severity,
            confidence,
            explanation: explanation.into(),
            recommended_action,
        })
    }

    pub fn category(&self) -> ViolationCategory {
        self.category
    }

    pub fn severity(&self) -> SeverityLevel {
        self.severity
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn recommended_action(&self) -> RecommendedAction {
        self.recommended_action
    }

    pub fn is_violation(&self) -> bool {
        self.category.is_violation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tokens_roundtrip() {
        for category in ViolationCategory::ALL {
            let parsed: ViolationCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!(ViolationCategory::ALL.contains(&ViolationCategory::None));
    }

    #[test]
    fn test_category_rejects_unknown() {
        let err = "profanity".parse::<ViolationCategory>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown violation category: 'profanity'");
    }

    #[test]
    fn test_category_case_insensitive() {
        assert_eq!(
            " HATE_SPEECH ".parse::<ViolationCategory>().unwrap(),
            ViolationCategory::HateSpeech
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(SeverityLevel::Low < SeverityLevel::Medium);
        assert!(SeverityLevel::Medium < SeverityLevel::High);
        assert!(SeverityLevel::High < SeverityLevel::Critical);
        assert_eq!(SeverityLevel::ALL.iter().max(), Some(&SeverityLevel::Critical));
    }

    #[test]
    fn test_recommended_action_includes_flag_for_review() {
        let action: RecommendedAction = "flag_for_review".parse().unwrap();
        assert_eq!(action, RecommendedAction::FlagForReview);
        assert!("escalate".parse::<RecommendedAction>().is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range_confidence() {
        for confidence in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let result = ViolationAssessment::new(
                ViolationCategory::Spam,
                SeverityLevel::Low,
                confidence,
                "x",
                RecommendedAction::Warn,
            );
            assert!(result.is_err(), "confidence {confidence} should be rejected");
        }
    }

    #[test]
    fn test_new_accepts_bounds() {
        for confidence in [0.0, 1.0] {
            let assessment = ViolationAssessment::new(
                ViolationCategory::None,
                SeverityLevel::Low,
                confidence,
                "fine",
                RecommendedAction::Approve,
            )
            .unwrap();
            assert_eq!(assessment.confidence(), confidence);
            assert!(!assessment.is_violation());
        }
    }

    #[test]
    fn test_serialize_uses_snake_case_tokens() {
        let assessment = ViolationAssessment::new(
            ViolationCategory::HateSpeech,
            SeverityLevel::Critical,
            0.9,
            "slur",
            RecommendedAction::FlagForReview,
        )
        .unwrap();
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["category"], "hate_speech");
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["recommended_action"], "flag_for_review");
    }
}
