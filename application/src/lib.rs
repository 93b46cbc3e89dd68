//! Application layer for content-moderation
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_REVIEWER, OracleParams, PipelineParams};
pub use ports::{
    classification_oracle::{ClassificationOracle, OracleError},
    human_review::{
        parse_reply, FixedActionReview, HumanReviewError, HumanReviewPort, HumanVerdict,
        ReviewRequest,
    },
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{ModerationProgressNotifier, NoProgress},
};
pub use use_cases::classify_content::LlmClassificationOracle;
pub use use_cases::run_moderation::{RunModerationError, RunModerationUseCase};
