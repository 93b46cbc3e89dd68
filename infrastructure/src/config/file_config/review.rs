//! Review configuration from TOML (`[review]` section)

use moderation_application::DEFAULT_REVIEWER;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw human-review configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Name recorded as decided-by for human decisions
    pub moderator_name: String,
    /// Prompts before an invalid reply gives up on the item
    pub max_attempts: u32,
    /// Unset waits forever
    pub timeout_seconds: Option<u64>,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            moderator_name: DEFAULT_REVIEWER.to_string(),
            max_attempts: 3,
            timeout_seconds: None,
        }
    }
}

impl FileReviewConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub(super) fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.moderator_name.trim().is_empty() {
            issues.push("review.moderator_name must not be empty".to_string());
        }
        if self.max_attempts == 0 {
            issues.push("review.max_attempts must be greater than 0".to_string());
        }
        if self.timeout_seconds == Some(0) {
            issues.push("review.timeout_seconds must be greater than 0".to_string());
        }
        issues
    }
}
