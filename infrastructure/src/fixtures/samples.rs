//! Built-in sample posts used when no content file is given

use super::file::{ContentFixture, FixtureError};
use chrono::Utc;
use moderation_domain::{
    ContentItem, ContentType, RecommendedAction, SeverityLevel, ViolationAssessment,
    ViolationCategory,
};
use std::collections::BTreeMap;

const PLATFORM: &str = "Social Media Platform";

/// id, category, severity, confidence, explanation, recommended action
type CannedRow = (
    &'static str,
    ViolationCategory,
    SeverityLevel,
    f64,
    &'static str,
    RecommendedAction,
);

/// Three posts covering the main paths: a clean post, a harassing comment,
/// and an image post that needs context.
pub fn sample_items() -> Vec<ContentItem> {
    let now = Utc::now();
    vec![
        ContentItem::text_post(
            "POST-001",
            "USER-12345",
            "I love this platform! The community here is so supportive and kind.",
        )
        .with_author_name("GoodUser123")
        .with_platform(PLATFORM)
        .with_context("Public post on user's profile")
        .with_created_at(now),
        ContentItem::text_post(
            "POST-002",
            "USER-67890",
            "This politician is completely corrupt and anyone who supports them is an idiot who deserves what's coming to them.",
        )
        .with_author_name("PoliticalRanter42")
        .with_platform(PLATFORM)
        .with_context("Comment on a news article")
        .with_created_at(now),
        ContentItem::new("POST-003", "USER-54321", ContentType::ImagePost)
            .with_text("Check out my new artwork!")
            .with_media_url("https://example.com/potentially-questionable-image.jpg")
            .with_author_name("ArtisticSoul99")
            .with_platform(PLATFORM)
            .with_context("Public post in art community")
            .with_created_at(now),
    ]
}

/// Canned assessments for [`sample_items`]
pub fn sample_assessments() -> Result<BTreeMap<String, ViolationAssessment>, FixtureError> {
    let canned: [CannedRow; 3] = [
        (
            "POST-001",
            ViolationCategory::None,
            SeverityLevel::Low,
            0.95,
            "This content is positive and does not violate any policies. It promotes a healthy community environment.",
            RecommendedAction::Approve,
        ),
        (
            "POST-002",
            ViolationCategory::Harassment,
            SeverityLevel::Medium,
            0.85,
            "This content contains potentially harassing language and insults directed at a group of people. The political context allows heated discussion, but the personal attacks cross into harassment. Human review recommended.",
            RecommendedAction::FlagForReview,
        ),
        (
            "POST-003",
            ViolationCategory::Nudity,
            SeverityLevel::High,
            0.75,
            "The post text is fine, but the image URL suggests potentially inappropriate content. Artistic context matters, so human review is recommended.",
            RecommendedAction::FlagForReview,
        ),
    ];

    build_assessments(canned)
}

fn build_assessments(
    rows: impl IntoIterator<Item = CannedRow>,
) -> Result<BTreeMap<String, ViolationAssessment>, FixtureError> {
    rows.into_iter()
        .map(|(id, category, severity, confidence, explanation, action)| {
            ViolationAssessment::new(category, severity, confidence, explanation, action)
                .map(|assessment| (id.to_string(), assessment))
                .map_err(|source| FixtureError::Assessment {
                    id: id.to_string(),
                    source,
                })
        })
        .collect()
}

/// The built-in sample set as a fixture
pub fn sample_fixture() -> Result<ContentFixture, FixtureError> {
    Ok(ContentFixture {
        items: sample_items(),
        assessments: sample_assessments()?,
        failures: BTreeMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_has_an_assessment() {
        let fixture = sample_fixture().unwrap();
        assert_eq!(fixture.items.len(), 3);
        assert_eq!(fixture.assessments.len(), 3);
        for item in &fixture.items {
            assert!(item.validate().is_ok());
            assert!(fixture.assessments.contains_key(&item.id), "{}", item.id);
        }
    }

    #[test]
    fn test_invalid_canned_row_is_reported() {
        let rows: [CannedRow; 2] = [
            (
                "POST-001",
                ViolationCategory::None,
                SeverityLevel::Low,
                0.9,
                "fine",
                RecommendedAction::Approve,
            ),
            (
                "POST-BAD",
                ViolationCategory::Spam,
                SeverityLevel::Low,
                1.5,
                "overconfident",
                RecommendedAction::Remove,
            ),
        ];

        let err = build_assessments(rows).unwrap_err();
        assert!(matches!(err, FixtureError::Assessment { ref id, .. } if id == "POST-BAD"));
    }

    #[test]
    fn test_only_first_sample_is_clean() {
        let assessments = sample_assessments().unwrap();
        let violations: Vec<_> = assessments
            .iter()
            .filter(|(_, a)| a.is_violation())
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(violations, ["POST-002", "POST-003"]);
    }
}
