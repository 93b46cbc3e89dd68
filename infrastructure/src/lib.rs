//! Infrastructure layer for content-moderation
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod fixtures;
pub mod providers;
pub mod review;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileOracleConfig, FileOutputConfig,
    FilePipelineConfig, FileReviewConfig, OracleProvider,
};
pub use fixtures::{
    ContentFixture, FixtureClassificationOracle, FixtureError, sample_assessments,
    sample_fixture, sample_items,
};
pub use providers::openai::{OpenAiGateway, OpenAiSession, OpenAiSettings};
pub use review::{ChannelHumanReview, ReviewReply, ReviewTicket, serve_json_lines};
