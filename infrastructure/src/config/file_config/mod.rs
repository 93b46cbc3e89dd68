//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod oracle;
mod output;
mod pipeline;
mod review;

pub use oracle::{FileOracleConfig, OracleProvider};
pub use output::FileOutputConfig;
pub use pipeline::FilePipelineConfig;
pub use review::FileReviewConfig;

use super::ConfigError;
use moderation_application::PipelineParams;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Classification oracle settings
    pub oracle: FileOracleConfig,
    /// Human review settings
    pub review: FileReviewConfig,
    /// Orchestrator settings
    pub pipeline: FilePipelineConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, reporting every issue at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = self.oracle.issues();
        issues.extend(self.review.issues());

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { issues })
        }
    }

    pub fn to_pipeline_params(&self) -> PipelineParams {
        PipelineParams::new(self.review.moderator_name.clone())
            .with_oracle_failure_policy(self.pipeline.on_oracle_failure)
            .with_review_timeout(self.review.timeout())
    }

    /// Render as TOML (for `--show-config`)
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moderation_domain::{Model, OracleFailurePolicy, OutputFormat};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[oracle]
provider = "fixture"
model = "gpt-4o"
timeout_seconds = 10

[review]
moderator_name = "Senior Moderator Johnson"
max_attempts = 5
timeout_seconds = 120

[pipeline]
on_oracle_failure = "defer"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.oracle.provider, OracleProvider::Fixture);
        assert_eq!(config.oracle.model(), Model::Gpt4o);
        assert_eq!(config.review.max_attempts, 5);
        assert_eq!(config.pipeline.on_oracle_failure, OracleFailurePolicy::Defer);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert!(config.validate().is_ok());

        let params = config.to_pipeline_params();
        assert_eq!(params.reviewer, "Senior Moderator Johnson");
        assert_eq!(params.review_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[review]
moderator_name = "Alex"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.review.moderator_name, "Alex");
        // Defaults should apply
        assert_eq!(config.review.max_attempts, 3);
        assert_eq!(config.oracle.timeout_seconds, 30);
        assert_eq!(config.pipeline.on_oracle_failure, OracleFailurePolicy::Review);
        assert!(config.output.color);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let toml_str = r#"
[oracle]
provider = "bedrock"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut config = FileConfig::default();
        config.review.max_attempts = 0;
        config.review.moderator_name = "  ".to_string();
        config.oracle.timeout_seconds = 0;

        match config.validate() {
            Err(ConfigError::Invalid { issues }) => assert_eq!(issues.len(), 3),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_to_toml_round_trips_sections() {
        let rendered = FileConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[oracle]"));
        assert!(rendered.contains("[review]"));
        assert!(rendered.contains("moderator_name = \"Senior Moderator Johnson\""));
    }
}
