//! Classification oracle parameters.

use moderation_domain::Model;
use std::time::Duration;

/// Parameters for [`LlmClassificationOracle`](crate::use_cases::classify_content::LlmClassificationOracle).
#[derive(Debug, Clone)]
pub struct OracleParams {
    /// Model that classifies content.
    pub model: Model,
    /// Upper bound on one classification round-trip. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl OracleParams {
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates params from an optional timeout in seconds.
    pub fn from_timeout_seconds(model: Model, seconds: Option<u64>) -> Self {
        Self {
            model,
            timeout: seconds.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = OracleParams::default();
        assert_eq!(params.model, Model::Gpt4oMini);
        assert_eq!(params.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_timeout_seconds() {
        let params = OracleParams::from_timeout_seconds(Model::Gpt4o, None);
        assert_eq!(params.model, Model::Gpt4o);
        assert!(params.timeout.is_none());
    }
}
