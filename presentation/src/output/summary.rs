//! End-of-run moderation summary

use super::formatter::SummaryFormatter;
use chrono::SecondsFormat;
use moderation_domain::core::string::{shout, truncate};
use moderation_domain::{ModerationAction, ModerationResult, Resolution};

const HEADER: &str = "===== CONTENT MODERATION SUMMARY =====";
const PREVIEW_CHARS: usize = 50;

/// Plain-text summary, one block per result in submission order.
///
/// ```text
/// ===== CONTENT MODERATION SUMMARY =====
/// - POST-002 (by PoliticalRanter42): WARN
///   Type: text_post
///   Text: "This politician is completely corrupt and anyone w..."
///   Violation: harassment (medium)
///   Moderated by: Senior Moderator Johnson
///   Moderation date: 2025-01-01T12:00:00Z
/// ```
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn render(results: &[ModerationResult]) -> String {
        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');

        for result in results {
            output.push_str(&Self::render_one(result));
            output.push('\n');
        }

        output.push_str(&Self::tally(results));
        output.push('\n');
        output
    }

    fn render_one(result: &ModerationResult) -> String {
        let item = result.item();
        let mut block = String::new();

        let outcome = match result.resolution() {
            Resolution::Actioned { action } => shout(action.as_str()),
            Resolution::Deferred { reason } => format!("DEFERRED ({})", reason),
        };
        block.push_str(&format!(
            "- {} (by {}): {}\n",
            item.id,
            item.author_display(),
            outcome
        ));
        block.push_str(&format!("  Type: {}\n", item.content_type));
        block.push_str(&format!(
            "  Text: \"{}\"\n",
            truncate(item.text_or_empty(), PREVIEW_CHARS)
        ));

        if let Some(assessment) = result.assessment().filter(|a| a.is_violation()) {
            block.push_str(&format!(
                "  Violation: {} ({})\n",
                assessment.category(),
                assessment.severity()
            ));
        }

        block.push_str(&format!("  Moderated by: {}\n", result.decided_by()));
        block.push_str(&format!(
            "  Moderation date: {}\n",
            result
                .decided_at()
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        ));

        if let Some(note) = result.note() {
            block.push_str(&format!("  Note: {}\n", note));
        }

        block
    }

    /// `Totals: 3 item(s) | approve 1, warn 1, restrict 0, remove 1, deferred 0`
    fn tally(results: &[ModerationResult]) -> String {
        let counts: Vec<String> = ModerationAction::ALL
            .iter()
            .map(|action| {
                let n = results.iter().filter(|r| r.action() == Some(*action)).count();
                format!("{} {}", action, n)
            })
            .collect();
        let deferred = results.iter().filter(|r| r.is_deferred()).count();

        format!(
            "Totals: {} item(s) | {}, deferred {}",
            results.len(),
            counts.join(", "),
            deferred
        )
    }
}

impl SummaryFormatter for SummaryReporter {
    fn format(&self, results: &[ModerationResult]) -> String {
        Self::render(results)
    }
}

/// JSON array of results
pub struct JsonSummary;

impl JsonSummary {
    pub fn format_json(results: &[ModerationResult]) -> String {
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
    }
}

impl SummaryFormatter for JsonSummary {
    fn format(&self, results: &[ModerationResult]) -> String {
        Self::format_json(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use moderation_domain::{
        ContentItem, ContentType, DecidedBy, RecommendedAction, SeverityLevel,
        ViolationAssessment, ViolationCategory,
    };

    fn assessment(category: ViolationCategory, severity: SeverityLevel) -> ViolationAssessment {
        ViolationAssessment::new(category, severity, 0.8, "why", RecommendedAction::FlagForReview)
            .unwrap()
    }

    fn results() -> Vec<ModerationResult> {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        vec![
            ModerationResult::auto_approved(
                ContentItem::text_post("POST-001", "USER-12345", "Lovely community")
                    .with_author_name("GoodUser123"),
                assessment(ViolationCategory::None, SeverityLevel::Low),
                at,
            ),
            ModerationResult::reviewed(
                ContentItem::new("POST-002", "USER-67890", ContentType::Comment).with_text(
                    "This politician is completely corrupt and anyone who supports them is an idiot.",
                ),
                Some(assessment(ViolationCategory::Harassment, SeverityLevel::Medium)),
                ModerationAction::Warn,
                "Sam",
                at,
            ),
            ModerationResult::reviewed(
                ContentItem::new("POST-003", "USER-54321", ContentType::ImagePost)
                    .with_text("Check out my new artwork!"),
                None,
                ModerationAction::Restrict,
                "Sam",
                at,
            )
            .with_note("classification failed (timeout): timed out after 30s"),
        ]
    }

    #[test]
    fn test_header_and_each_item_once() {
        let rendered = SummaryReporter::render(&results());
        assert!(rendered.starts_with(HEADER));

        for needle in [
            "POST-001", "POST-002", "POST-003", "APPROVE", "WARN", "RESTRICT", "text_post",
            "comment", "image_post",
        ] {
            assert_eq!(rendered.matches(needle).count(), 1, "{needle}");
        }
    }

    #[test]
    fn test_each_item_has_one_block_when_text_mentions_others() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();
        let results = vec![
            ModerationResult::reviewed(
                ContentItem::text_post("POST-001", "USER-1", "Mods said REMOVE POST-002 now"),
                Some(assessment(ViolationCategory::Harassment, SeverityLevel::Low)),
                ModerationAction::Warn,
                "Sam",
                at,
            ),
            ModerationResult::reviewed(
                ContentItem::text_post("POST-002", "USER-2", "- POST-001 (by USER-1): APPROVE"),
                Some(assessment(ViolationCategory::Spam, SeverityLevel::Low)),
                ModerationAction::Remove,
                "Sam",
                at,
            ),
        ];

        let rendered = SummaryReporter::render(&results);
        let blocks: Vec<&str> = rendered.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(
            blocks,
            ["- POST-001 (by USER-1): WARN", "- POST-002 (by USER-2): REMOVE"]
        );
        assert_eq!(rendered.matches("  Type: text_post\n").count(), 2);
        assert_eq!(rendered.matches("  Moderated by: Sam\n").count(), 2);
    }

    #[test]
    fn test_item_block_layout() {
        let rendered = SummaryReporter::render(&results());
        assert!(rendered.contains("- POST-001 (by GoodUser123): APPROVE\n"));
        // Falls back to author id without a display name
        assert!(rendered.contains("- POST-002 (by USER-67890): WARN\n"));
        assert!(rendered.contains("  Moderated by: AI System\n"));
        assert!(rendered.contains("  Moderated by: Sam\n"));
        assert!(rendered.contains("  Moderation date: 2025-03-14T09:26:53Z\n"));
        assert!(rendered.contains("  Note: classification failed (timeout)"));
    }

    #[test]
    fn test_preview_truncated_at_fifty_chars() {
        let rendered = SummaryReporter::render(&results());
        assert!(rendered.contains("  Text: \"This politician is completely corrupt and anyone w...\"\n"));
        assert!(rendered.contains("  Text: \"Check out my new artwork!\"\n"));
    }

    #[test]
    fn test_violation_line_only_for_violations() {
        let rendered = SummaryReporter::render(&results());
        assert!(rendered.contains("  Violation: harassment (medium)\n"));
        assert_eq!(rendered.matches("Violation:").count(), 1);
    }

    #[test]
    fn test_deferred_shows_reason() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();
        let deferred = ModerationResult::deferred(
            ContentItem::text_post("POST-009", "USER-1", "hi"),
            None,
            DecidedBy::human("Sam"),
            "no reply within 60s",
            at,
        );
        let rendered = SummaryReporter::render(&[deferred]);
        assert!(rendered.contains("- POST-009 (by USER-1): DEFERRED (no reply within 60s)\n"));
        assert!(rendered.contains("deferred 1"));
    }

    #[test]
    fn test_tally() {
        let rendered = SummaryReporter::render(&results());
        assert!(rendered.ends_with(
            "Totals: 3 item(s) | approve 1, warn 1, restrict 1, remove 0, deferred 0\n"
        ));
    }

    #[test]
    fn test_empty_summary() {
        let rendered = SummaryReporter::render(&[]);
        assert!(rendered.starts_with(HEADER));
        assert!(rendered.contains("Totals: 0 item(s)"));
    }

    #[test]
    fn test_json_summary() {
        let json = JsonSummary::format_json(&results());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[0]["status"], "actioned");
        assert_eq!(array[0]["action"], "approve");
        assert_eq!(array[0]["decided_by"], "AI System");
        assert_eq!(array[2]["assessment"], serde_json::Value::Null);
    }

    #[test]
    fn test_formatter_for() {
        use crate::output::formatter::formatter_for;
        use moderation_domain::OutputFormat;

        let text = formatter_for(OutputFormat::Text).format(&results());
        assert!(text.starts_with(HEADER));
        let json = formatter_for(OutputFormat::Json).format(&results());
        assert!(json.trim_start().starts_with('['));
    }
}
