//! OpenAI-compatible Chat Completions provider
//!
//! Works with api.openai.com and any server exposing the same
//! `/chat/completions` contract.

mod gateway;
mod session;
mod types;

pub use gateway::OpenAiGateway;
pub use session::OpenAiSession;

use std::time::Duration;

/// Connection settings for [`OpenAiGateway`]
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// Base URL up to and including the API version (`https://api.openai.com/v1`)
    pub base_url: String,
    pub api_key: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenAiSettings {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_completions_url() {
        let mut settings = OpenAiSettings {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        };
        assert_eq!(
            settings.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        settings.base_url = "http://localhost:8080/v1/".to_string();
        assert_eq!(
            settings.chat_completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }
}
