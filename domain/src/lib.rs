//! Domain layer for content-moderation
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Content Item**: one post submitted for moderation ([`ContentItem`])
//! - **Violation Assessment**: the oracle's structured judgment, validated on
//!   construction ([`ViolationAssessment`])
//! - **Decision Policy**: auto-approve when no violation was found, otherwise
//!   ask a human ([`DecisionPolicy`])
//! - **Moderation Result**: the immutable record of what was done and by whom
//!   ([`ModerationResult`])

pub mod assessment;
pub mod config;
pub mod content;
pub mod core;
pub mod moderation;
pub mod prompt;

// Re-export commonly used types
pub use assessment::{
    AssessmentError, RawAssessment, RecommendedAction, SeverityLevel, ViolationAssessment,
    ViolationCategory, parse_assessment_response,
};
pub use config::OutputFormat;
pub use content::{ContentItem, ContentType};
pub use core::{error::DomainError, model::Model};
pub use moderation::{
    AI_SYSTEM, AUTO_APPROVED_NOTE, DecidedBy, DecisionPolicy, ItemState, ModerationAction,
    ModerationResult, OracleFailurePolicy, REVIEWED_NOTE, Resolution, ReviewDecision,
};
pub use prompt::ModerationPromptTemplate;
