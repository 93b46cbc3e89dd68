//! Strict assessment parsing.
//!
//! Extracts a [`ViolationAssessment`] from free-form oracle output. Pure
//! domain logic with no I/O. Nothing here falls back to a default: any
//! missing field or unknown token is an [`AssessmentError`], and so is a
//! confidence outside `[0.0, 1.0]`.
//!
//! # Accepted shapes
//!
//! 1. Bare JSON: `{"category": "spam", "severity": "low", ...}`
//! 2. JSON inside prose or a markdown code fence
//!
//! Field names follow the assessment schema (`category`, `severity`,
//! `confidence`, `explanation`, `recommended_action`); the longer
//! `violation_category` / `severity_level` / `ai_confidence` spellings are
//! accepted as aliases.

use super::value_objects::ViolationAssessment;
use crate::core::error::DomainError;
use serde::Deserialize;
use thiserror::Error;

/// Why an oracle response could not become an assessment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    #[error("response contains no JSON object")]
    NoJsonObject,

    #[error("malformed assessment JSON: {0}")]
    MalformedJson(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid {field}: {source}")]
    InvalidToken {
        field: &'static str,
        source: DomainError,
    },

    #[error("confidence {0} is outside [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),
}

/// Unvalidated assessment fields exactly as the oracle sent them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAssessment {
    #[serde(default, alias = "violation_category")]
    pub category: Option<String>,
    #[serde(default, alias = "severity_level")]
    pub severity: Option<String>,
    #[serde(default, alias = "ai_confidence")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub recommended_action: Option<String>,
}

impl TryFrom<RawAssessment> for ViolationAssessment {
    type Error = AssessmentError;

    fn try_from(raw: RawAssessment) -> Result<Self, Self::Error> {
        let category = required(raw.category.as_deref(), "category")?
            .parse()
            .map_err(|source| AssessmentError::InvalidToken {
                field: "category",
                source,
            })?;
        let severity = required(raw.severity.as_deref(), "severity")?
            .parse()
            .map_err(|source| AssessmentError::InvalidToken {
                field: "severity",
                source,
            })?;
        let recommended_action = required(raw.recommended_action.as_deref(), "recommended_action")?
            .parse()
            .map_err(|source| AssessmentError::InvalidToken {
                field: "recommended_action",
                source,
            })?;
        let confidence = raw
            .confidence
            .ok_or(AssessmentError::MissingField("confidence"))?;
        let explanation = required(raw.explanation.as_deref(), "explanation")?;

        ViolationAssessment::new(category, severity, confidence, explanation, recommended_action)
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, AssessmentError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AssessmentError::MissingField(field)),
    }
}

/// Parse an oracle response into a validated assessment.
///
/// # Examples
///
/// ```
/// use moderation_domain::assessment::{parse_assessment_response, ViolationCategory};
///
/// let response = r#"{"category": "spam", "severity": "low", "confidence": 0.8,
///                    "explanation": "Repeated link", "recommended_action": "warn"}"#;
/// let assessment = parse_assessment_response(response).unwrap();
/// assert_eq!(assessment.category(), ViolationCategory::Spam);
///
/// assert!(parse_assessment_response("looks fine to me").is_err());
/// ```
pub fn parse_assessment_response(response: &str) -> Result<ViolationAssessment, AssessmentError> {
    let json = extract_json_object(response).ok_or(AssessmentError::NoJsonObject)?;
    let raw: RawAssessment =
        serde_json::from_str(json).map_err(|e| AssessmentError::MalformedJson(e.to_string()))?;
    ViolationAssessment::try_from(raw)
}

/// Slice from the first `{` to the last `}`.
fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}
