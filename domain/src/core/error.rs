//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown {kind}: '{value}'")]
    UnknownToken { kind: &'static str, value: String },

    #[error("Invalid content item: {0}")]
    InvalidContentItem(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
}

impl DomainError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        DomainError::UnknownToken {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_token_display() {
        let error = DomainError::unknown("action", "ban");
        assert_eq!(error.to_string(), "Unknown action: 'ban'");
    }

    #[test]
    fn test_invalid_content_item_display() {
        let error = DomainError::InvalidContentItem("id is empty".to_string());
        assert_eq!(error.to_string(), "Invalid content item: id is empty");
    }

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition {
            from: "pending",
            to: "resolved",
        };
        assert_eq!(error.to_string(), "Invalid state transition: pending -> resolved");
    }
}
