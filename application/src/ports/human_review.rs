//! Human review port for items the policy could not auto-approve.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`HumanReviewPort`] - defined here in application layer
//! - **Adapters**: `ConsoleHumanReview` (presentation) and
//!   `ChannelHumanReview` (infrastructure, served over JSON lines by the CLI)
//!
//! # Flow
//!
//! ```text
//! Oracle assessment (violation) ── or ── Oracle failure
//!        ↓                                    ↓
//!               HumanReviewPort::request_decision()
//!                              ↓
//!        Reviewer replies: approve / warn / restrict / remove
//! ```
//!
//! # Built-in Implementations
//!
//! - [`FixedActionReview`] - Always answers with one configured action

use async_trait::async_trait;
use moderation_domain::{ContentItem, ModerationAction, ModerationPromptTemplate, ViolationAssessment};
use std::time::Duration;
use thiserror::Error;

/// Everything a reviewer needs to decide on one item.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub item: ContentItem,
    /// `None` when classification failed
    pub assessment: Option<ViolationAssessment>,
    /// Oracle failure text, set only when `assessment` is `None`
    pub failure: Option<String>,
    pub reviewer: String,
}

impl ReviewRequest {
    pub fn for_assessment(
        item: ContentItem,
        assessment: ViolationAssessment,
        reviewer: impl Into<String>,
    ) -> Self {
        Self {
            item,
            assessment: Some(assessment),
            failure: None,
            reviewer: reviewer.into(),
        }
    }

    pub fn for_failure(
        item: ContentItem,
        failure: impl Into<String>,
        reviewer: impl Into<String>,
    ) -> Self {
        Self {
            item,
            assessment: None,
            failure: Some(failure.into()),
            reviewer: reviewer.into(),
        }
    }

    /// The full review prompt text
    pub fn prompt_text(&self) -> String {
        ModerationPromptTemplate::review_prompt(
            &self.item,
            self.assessment.as_ref(),
            self.failure.as_deref(),
        )
    }

    /// The closing question addressed to the reviewer
    pub fn question(&self) -> String {
        ModerationPromptTemplate::action_question(&self.reviewer)
    }
}

/// A reviewer's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanVerdict {
    pub action: ModerationAction,
    pub reviewer: String,
}

/// Failures while collecting a verdict.
///
/// These are not decisions: the pipeline turns all of them except
/// `Cancelled` into a deferred result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HumanReviewError {
    /// Reviewer aborted the whole run (e.g. Ctrl+C, end of input).
    #[error("Review cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("no valid action after {attempts} attempt(s), last input: '{last_input}'")]
    InvalidAction { attempts: u32, last_input: String },

    #[error("review channel closed")]
    ChannelClosed,

    #[error("no reply within {0:?}")]
    Timeout(Duration),
}

/// Port for requesting a human moderation decision.
#[async_trait]
pub trait HumanReviewPort: Send + Sync {
    async fn request_decision(
        &self,
        request: &ReviewRequest,
    ) -> Result<HumanVerdict, HumanReviewError>;
}

/// Parse one reply line into an action.
///
/// Case-insensitive, surrounding whitespace ignored. The error carries the
/// trimmed input for diagnostics.
pub fn parse_reply(input: &str) -> Result<ModerationAction, String> {
    input
        .parse::<ModerationAction>()
        .map_err(|_| input.trim().to_string())
}

/// Answers every request with the same action.
///
/// Used for unattended runs (`--auto <ACTION>`). The verdict is attributed to
/// the reviewer named in the request.
pub struct FixedActionReview {
    action: ModerationAction,
}

impl FixedActionReview {
    pub fn new(action: ModerationAction) -> Self {
        Self { action }
    }
}

#[async_trait]
impl HumanReviewPort for FixedActionReview {
    async fn request_decision(
        &self,
        request: &ReviewRequest,
    ) -> Result<HumanVerdict, HumanReviewError> {
        Ok(HumanVerdict {
            action: self.action,
            reviewer: request.reviewer.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReviewRequest {
        ReviewRequest::for_failure(
            ContentItem::text_post("post_3", "user_789", "hello"),
            "timed out after 30s",
            "Sam",
        )
    }

    #[tokio::test]
    async fn test_fixed_action_review() {
        let review = FixedActionReview::new(ModerationAction::Restrict);
        let verdict = review.request_decision(&request()).await.unwrap();
        assert_eq!(verdict.action, ModerationAction::Restrict);
        assert_eq!(verdict.reviewer, "Sam");
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(parse_reply("  Remove \n"), Ok(ModerationAction::Remove));
        assert_eq!(parse_reply("ban "), Err("ban".to_string()));
        assert_eq!(parse_reply(""), Err(String::new()));
        assert!(parse_reply("flag_for_review").is_err());
    }

    #[test]
    fn test_request_prompt_mentions_failure() {
        let request = request();
        let text = request.prompt_text();
        assert!(text.contains("post_3"));
        assert!(text.contains("timed out after 30s"));
        assert!(request.question().starts_with("Sam, what action"));
    }
}
