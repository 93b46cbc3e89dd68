//! Oracle configuration from TOML (`[oracle]` section)

use crate::config::ConfigError;
use crate::providers::openai::OpenAiSettings;
use moderation_application::OracleParams;
use moderation_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which classification oracle backs the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleProvider {
    /// OpenAI-compatible `/chat/completions` endpoint
    #[default]
    OpenAi,
    /// Canned assessments, no network
    Fixture,
}

impl OracleProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleProvider::OpenAi => "openai",
            OracleProvider::Fixture => "fixture",
        }
    }
}

impl std::str::FromStr for OracleProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(OracleProvider::OpenAi),
            "fixture" => Ok(OracleProvider::Fixture),
            other => Err(format!("unknown oracle provider '{}' (openai, fixture)", other)),
        }
    }
}

/// Raw oracle configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    pub provider: OracleProvider,
    /// Model name sent to the endpoint
    pub model: String,
    /// Base URL of the OpenAI-compatible API (no trailing `/chat/completions`)
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (not recommended; prefer the env var)
    pub api_key: Option<String>,
    pub temperature: f32,
    /// Upper bound on one classification round-trip
    pub timeout_seconds: u64,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::OpenAi,
            model: Model::default().to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            temperature: 0.2,
            timeout_seconds: 30,
        }
    }
}

impl FileOracleConfig {
    pub fn model(&self) -> Model {
        let Ok(model) = self.model.parse::<Model>();
        model
    }

    pub fn to_oracle_params(&self) -> OracleParams {
        OracleParams::from_timeout_seconds(self.model(), Some(self.timeout_seconds))
    }

    /// API key from `api_key`, falling back to the `api_key_env` variable.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.to_string());
        }
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                env: self.api_key_env.clone(),
            })
    }

    /// Connection settings for the OpenAI gateway; requires an API key.
    pub fn to_openai_settings(&self) -> Result<OpenAiSettings, ConfigError> {
        Ok(OpenAiSettings {
            base_url: self.base_url.clone(),
            api_key: self.resolve_api_key()?,
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_seconds),
        })
    }

    pub(super) fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.model.trim().is_empty() {
            issues.push("oracle.model must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            issues.push("oracle.timeout_seconds must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(format!(
                "oracle.temperature must be within [0, 2], got {}",
                self.temperature
            ));
        }
        issues
    }
}
