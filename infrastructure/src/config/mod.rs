//! Configuration file loading for content-moderation
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MODERATION_` environment variables (`MODERATION_REVIEW__MAX_ATTEMPTS=5`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./moderation.toml` or `./.moderation.toml`
//! 4. Global: `$XDG_CONFIG_HOME/content-moderation/config.toml`
//!    (fallback `~/.config/content-moderation/config.toml`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileOracleConfig, FileOutputConfig, FilePipelineConfig, FileReviewConfig,
    OracleProvider,
};
pub use loader::ConfigLoader;

use thiserror::Error;

/// Configuration problems detected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {}", .issues.join("; "))]
    Invalid { issues: Vec<String> },

    #[error("missing API key: set the {env} environment variable or oracle.api_key")]
    MissingApiKey { env: String },

    #[error("failed to render configuration: {0}")]
    Render(String),
}
