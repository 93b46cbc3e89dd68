//! Terminal moderation actions

use crate::assessment::RecommendedAction;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// An action actually taken on a content item.
///
/// This is the subset of [`RecommendedAction`] that can end processing:
/// there is deliberately no `FlagForReview` variant, so a recorded result
/// can never carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Approve,
    Warn,
    Restrict,
    Remove,
}

impl ModerationAction {
    pub const ALL: [ModerationAction; 4] = [
        ModerationAction::Approve,
        ModerationAction::Warn,
        ModerationAction::Restrict,
        ModerationAction::Remove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Warn => "warn",
            ModerationAction::Restrict => "restrict",
            ModerationAction::Remove => "remove",
        }
    }

    /// Slash-separated vocabulary for prompts: `approve/warn/restrict/remove`
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Confirmation sentence shown once a reviewer picked this action
    pub fn confirmation(&self, content_id: &str, reviewer: &str) -> String {
        match self {
            ModerationAction::Approve => {
                format!("Content {} has been approved by {}.", content_id, reviewer)
            }
            ModerationAction::Warn => format!(
                "Content {} has been approved with a warning to the user by {}.",
                content_id, reviewer
            ),
            ModerationAction::Restrict => format!(
                "Content {} has been restricted (limited visibility) by {}.",
                content_id, reviewer
            ),
            ModerationAction::Remove => {
                format!("Content {} has been removed by {}.", content_id, reviewer)
            }
        }
    }
}

impl std::fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModerationAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == token)
            .ok_or_else(|| DomainError::unknown("action", s))
    }
}

impl TryFrom<RecommendedAction> for ModerationAction {
    type Error = DomainError;

    /// Fails only for `FlagForReview`, which needs a human to become terminal.
    fn try_from(recommended: RecommendedAction) -> Result<Self, Self::Error> {
        match recommended {
            RecommendedAction::Approve => Ok(ModerationAction::Approve),
            RecommendedAction::Warn => Ok(ModerationAction::Warn),
            RecommendedAction::Restrict => Ok(ModerationAction::Restrict),
            RecommendedAction::Remove => Ok(ModerationAction::Remove),
            RecommendedAction::FlagForReview => {
                Err(DomainError::unknown("terminal action", recommended.as_str()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!("approve".parse::<ModerationAction>().unwrap(), ModerationAction::Approve);
        assert_eq!(" WARN\n".parse::<ModerationAction>().unwrap(), ModerationAction::Warn);
        assert_eq!("Restrict".parse::<ModerationAction>().unwrap(), ModerationAction::Restrict);
        assert_eq!("remove".parse::<ModerationAction>().unwrap(), ModerationAction::Remove);
    }

    #[test]
    fn test_flag_for_review_is_not_an_action() {
        assert!("flag_for_review".parse::<ModerationAction>().is_err());
        assert!(ModerationAction::try_from(RecommendedAction::FlagForReview).is_err());
    }

    #[test]
    fn test_terminal_recommendations_convert() {
        assert_eq!(
            ModerationAction::try_from(RecommendedAction::Remove).unwrap(),
            ModerationAction::Remove
        );
    }

    #[test]
    fn test_vocabulary() {
        assert_eq!(ModerationAction::vocabulary(), "approve/warn/restrict/remove");
    }

    #[test]
    fn test_confirmation_messages() {
        assert_eq!(
            ModerationAction::Warn.confirmation("POST-002", "Mod Jane"),
            "Content POST-002 has been approved with a warning to the user by Mod Jane."
        );
        assert_eq!(
            ModerationAction::Remove.confirmation("POST-003", "Mod Jane"),
            "Content POST-003 has been removed by Mod Jane."
        );
    }
}
