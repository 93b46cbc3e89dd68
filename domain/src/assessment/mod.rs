//! Violation assessments produced by the classification oracle.
//!
//! - [`value_objects`]: category, severity, recommended action and the
//!   validated [`ViolationAssessment`]
//! - [`parsing`]: strict extraction of an assessment from raw oracle output

pub mod parsing;
pub mod value_objects;

pub use parsing::{AssessmentError, RawAssessment, parse_assessment_response};
pub use value_objects::{RecommendedAction, SeverityLevel, ViolationAssessment, ViolationCategory};
