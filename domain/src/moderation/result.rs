//! Moderation result: the final record for one content item.

use super::action::ModerationAction;
use crate::assessment::ViolationAssessment;
use crate::content::ContentItem;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Display name recorded for decisions made without a human
pub const AI_SYSTEM: &str = "AI System";

/// Moderator note on results the policy approved without review
pub const AUTO_APPROVED_NOTE: &str = "Auto-approved by AI system";

/// Moderator note on results a reviewer decided
pub const REVIEWED_NOTE: &str = "Reviewed by human moderator";

/// Who made the final call on an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecidedBy {
    AiSystem,
    Human(String),
}

impl DecidedBy {
    pub fn human(name: impl Into<String>) -> Self {
        DecidedBy::Human(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            DecidedBy::AiSystem => AI_SYSTEM,
            DecidedBy::Human(name) => name,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, DecidedBy::Human(_))
    }
}

impl std::fmt::Display for DecidedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DecidedBy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// How processing of an item ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// A terminal action was taken.
    Actioned { action: ModerationAction },
    /// No action could be decided (review failed or the item was parked).
    Deferred { reason: String },
}

/// Immutable record of what happened to one content item and by whom.
///
/// Fields are private; results are built by the constructors below and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationResult {
    item: ContentItem,
    #[serde(flatten)]
    resolution: Resolution,
    assessment: Option<ViolationAssessment>,
    decided_by: DecidedBy,
    decided_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl ModerationResult {
    /// No violation found: approved by the AI system.
    pub fn auto_approved(
        item: ContentItem,
        assessment: ViolationAssessment,
        decided_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item,
            resolution: Resolution::Actioned {
                action: ModerationAction::Approve,
            },
            assessment: Some(assessment),
            decided_by: DecidedBy::AiSystem,
            decided_at,
            note: None,
        }
    }

    /// A human reviewer picked the action.
    pub fn reviewed(
        item: ContentItem,
        assessment: Option<ViolationAssessment>,
        action: ModerationAction,
        reviewer: impl Into<String>,
        decided_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item,
            resolution: Resolution::Actioned { action },
            assessment,
            decided_by: DecidedBy::human(reviewer),
            decided_at,
            note: None,
        }
    }

    /// Processing ended without an action.
    pub fn deferred(
        item: ContentItem,
        assessment: Option<ViolationAssessment>,
        decided_by: DecidedBy,
        reason: impl Into<String>,
        decided_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item,
            resolution: Resolution::Deferred {
                reason: reason.into(),
            },
            assessment,
            decided_by,
            decided_at,
            note: None,
        }
    }

    /// Attach a free-text note (e.g. the oracle failure that forced review)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    // ==================== Accessors ====================

    pub fn content_id(&self) -> &str {
        &self.item.id
    }

    pub fn item(&self) -> &ContentItem {
        &self.item
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// The action taken, or `None` for a deferred item
    pub fn action(&self) -> Option<ModerationAction> {
        match &self.resolution {
            Resolution::Actioned { action } => Some(*action),
            Resolution::Deferred { .. } => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.resolution, Resolution::Deferred { .. })
    }

    pub fn assessment(&self) -> Option<&ViolationAssessment> {
        self.assessment.as_ref()
    }

    pub fn decided_by(&self) -> &DecidedBy {
        &self.decided_by
    }

    pub fn decided_at(&self) -> DateTime<Utc> {
        self.decided_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{RecommendedAction, SeverityLevel, ViolationCategory};

    fn item() -> ContentItem {
        ContentItem::text_post("POST-001", "USER-1", "hello")
    }

    fn clean() -> ViolationAssessment {
        ViolationAssessment::new(
            ViolationCategory::None,
            SeverityLevel::Low,
            0.95,
            "fine",
            RecommendedAction::Approve,
        )
        .unwrap()
    }

    #[test]
    fn test_auto_approved_is_ai_system() {
        let result = ModerationResult::auto_approved(item(), clean(), Utc::now());
        assert_eq!(result.action(), Some(ModerationAction::Approve));
        assert_eq!(result.decided_by().as_str(), "AI System");
        assert!(!result.decided_by().is_human());
        assert_eq!(result.content_id(), "POST-001");
    }

    #[test]
    fn test_reviewed_records_reviewer() {
        let result =
            ModerationResult::reviewed(item(), None, ModerationAction::Warn, "Mod Jane", Utc::now())
                .with_note("oracle timed out");
        assert_eq!(result.action(), Some(ModerationAction::Warn));
        assert_eq!(result.decided_by(), &DecidedBy::human("Mod Jane"));
        assert!(result.assessment().is_none());
        assert_eq!(result.note(), Some("oracle timed out"));
    }

    #[test]
    fn test_deferred_has_no_action() {
        let result = ModerationResult::deferred(
            item(),
            Some(clean()),
            DecidedBy::AiSystem,
            "review channel closed",
            Utc::now(),
        );
        assert!(result.is_deferred());
        assert_eq!(result.action(), None);
    }

    #[test]
    fn test_serialize_shape() {
        let result = ModerationResult::reviewed(
            item(),
            Some(clean()),
            ModerationAction::Remove,
            "Mod Jane",
            Utc::now(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "actioned");
        assert_eq!(json["action"], "remove");
        assert_eq!(json["decided_by"], "Mod Jane");
        assert_eq!(json["item"]["id"], "POST-001");
        assert_eq!(json["assessment"]["category"], "none");
        assert!(json.get("note").is_none());
    }
}
