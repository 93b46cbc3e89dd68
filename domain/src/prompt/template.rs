//! Prompt templates for the moderation flow

use crate::assessment::{RecommendedAction, SeverityLevel, ViolationAssessment, ViolationCategory};
use crate::content::ContentItem;
use crate::core::string::shout;
use crate::moderation::ModerationAction;

/// Templates for generating prompts at each stage
pub struct ModerationPromptTemplate;

impl ModerationPromptTemplate {
    /// System prompt for the classification oracle
    pub fn classification_system() -> String {
        format!(
            r#"You are a content moderation assistant for a social media platform.
Your task is to pre-screen user-generated content for policy violations.
Human moderators make the final call on anything you flag, so be precise and explain your reasoning.
Respond with a single JSON object and nothing else, using exactly these fields:

  "category": one of {categories}
  "severity": one of {severities}
  "confidence": a number between 0.0 and 1.0
  "explanation": one or two sentences justifying the classification
  "recommended_action": one of {actions}

Use "none" only when the content violates no policy."#,
            categories = quoted(ViolationCategory::ALL.iter().map(|c| c.as_str())),
            severities = quoted(SeverityLevel::ALL.iter().map(|s| s.as_str())),
            actions = quoted(RecommendedAction::ALL.iter().map(|a| a.as_str())),
        )
    }

    /// User prompt asking the oracle to classify one item
    pub fn classification_prompt(item: &ContentItem) -> String {
        let mut prompt = format!(
            "Classify the following content for policy violations.\n\nContent Type: {}\n",
            item.content_type
        );

        prompt.push_str(&format!("Posted by: {}\n", item.author_display()));
        if let Some(platform) = &item.platform {
            prompt.push_str(&format!("Platform: {}\n", platform));
        }
        if let Some(context) = &item.context {
            prompt.push_str(&format!("Context: {}\n", context));
        }
        if let Some(url) = &item.media_url {
            prompt.push_str(&format!("Media: {}\n", url));
        }

        prompt.push_str(&format!("Text: \"{}\"\n", item.text_or_empty()));

        if item.media_url.is_some() || item.content_type.has_media() {
            prompt.push_str(
                "\nYou cannot view the media itself; judge it from the surrounding text and any URL, \
                 and flag it for review when in doubt.\n",
            );
        }

        prompt.push_str(
            "\nReturn the JSON object with category, severity, confidence, explanation and recommended_action.",
        );

        prompt
    }

    /// Review prompt shown to a human moderator.
    ///
    /// `assessment` is `None` when the oracle call failed; `failure` then
    /// carries the error text so the reviewer knows why.
    pub fn review_prompt(
        item: &ContentItem,
        assessment: Option<&ViolationAssessment>,
        failure: Option<&str>,
    ) -> String {
        let mut prompt = String::from("CONTENT MODERATION REVIEW REQUIRED\n\n");

        prompt.push_str(&format!("Content ID: {}\n", item.id));
        prompt.push_str(&format!("Posted by: {}\n", item.author_display()));
        prompt.push_str(&format!("Content Type: {}\n", item.content_type));
        if let Some(url) = &item.media_url {
            prompt.push_str(&format!("Media: {}\n", url));
        }

        prompt.push_str(&format!("\nCONTENT TEXT:\n\"{}\"\n", item.text_or_empty()));

        match assessment {
            Some(assessment) => {
                prompt.push_str("\nAI ASSESSMENT:\n");
                prompt.push_str(&format!(
                    "- Violation Category: {}\n",
                    shout(assessment.category().as_str())
                ));
                prompt.push_str(&format!(
                    "- Severity Level: {}\n",
                    shout(assessment.severity().as_str())
                ));
                prompt.push_str(&format!("- AI Confidence: {:.2}\n", assessment.confidence()));
                prompt.push_str(&format!(
                    "- Recommended Action: {}\n",
                    shout(assessment.recommended_action().as_str())
                ));
                prompt.push_str(&format!("\nAI EXPLANATION:\n{}\n", assessment.explanation()));
            }
            None => {
                prompt.push_str("\nAI ASSESSMENT:\n- Unavailable\n");
                if let Some(reason) = failure {
                    prompt.push_str(&format!("\nCLASSIFICATION FAILURE:\n{}\n", reason));
                }
            }
        }

        prompt.push_str("\nTHIS CONTENT REQUIRES HUMAN REVIEW BEFORE TAKING ACTION.\n");
        prompt
    }

    /// Question closing the review prompt
    pub fn action_question(moderator: &str) -> String {
        format!(
            "{}, what action should be taken? ({}):",
            moderator,
            ModerationAction::vocabulary()
        )
    }
}

fn quoted<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ")
}
