//! Content entities
//!
//! A [`ContentItem`] is built once by the caller (or a fixture file) and is
//! never modified by the pipeline; every later stage only borrows it.

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of post being moderated.
///
/// The set is open: unrecognized tokens are kept verbatim as
/// [`ContentType::Custom`] instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    TextPost,
    ImagePost,
    VideoPost,
    Comment,
    Custom(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::TextPost => "text_post",
            ContentType::ImagePost => "image_post",
            ContentType::VideoPost => "video_post",
            ContentType::Comment => "comment",
            ContentType::Custom(s) => s,
        }
    }

    /// Whether the content carries media the oracle cannot see directly
    pub fn has_media(&self) -> bool {
        matches!(self, ContentType::ImagePost | ContentType::VideoPost)
    }
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::TextPost
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "text_post" => ContentType::TextPost,
            "image_post" => ContentType::ImagePost,
            "video_post" => ContentType::VideoPost,
            "comment" => ContentType::Comment,
            _ => ContentType::Custom(s.trim().to_string()),
        })
    }
}

impl Serialize for ContentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(content_type) = s.parse::<ContentType>();
        Ok(content_type)
    }
}

/// One piece of user content to be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique content identifier (e.g. "POST-001")
    pub id: String,
    /// Author identifier (e.g. "USER-12345")
    pub author_id: String,
    /// Author's display name, shown to reviewers instead of the raw id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub content_type: ContentType,
    /// Text body, passed to the oracle verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Media reference (URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Where the content was posted (e.g. "Comment on a news article")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            author_name: None,
            content_type,
            text: None,
            media_url: None,
            platform: None,
            context: None,
            created_at: None,
        }
    }

    /// Shorthand for a text post
    pub fn text_post(
        id: impl Into<String>,
        author_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(id, author_id, ContentType::TextPost).with_text(text)
    }

    // ==================== Builder Methods ====================

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    // ==================== Queries ====================

    /// Text body, or an empty string for media-only content
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Name to show for the author: display name if known, else the id
    pub fn author_display(&self) -> &str {
        self.author_name.as_deref().unwrap_or(&self.author_id)
    }

    /// Check the identifiers a result must be traceable by.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidContentItem(
                "content id is empty".to_string(),
            ));
        }
        if self.author_id.trim().is_empty() {
            return Err(DomainError::InvalidContentItem(format!(
                "{}: author id is empty",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_known_tokens() {
        assert_eq!("text_post".parse::<ContentType>().unwrap(), ContentType::TextPost);
        assert_eq!("IMAGE_POST".parse::<ContentType>().unwrap(), ContentType::ImagePost);
        assert_eq!("video_post".parse::<ContentType>().unwrap(), ContentType::VideoPost);
        assert_eq!("comment".parse::<ContentType>().unwrap(), ContentType::Comment);
    }

    #[test]
    fn test_content_type_is_extensible() {
        let kind: ContentType = "live_stream".parse().unwrap();
        assert_eq!(kind, ContentType::Custom("live_stream".to_string()));
        assert_eq!(kind.to_string(), "live_stream");
    }

    #[test]
    fn test_content_type_serde() {
        let json = serde_json::to_string(&ContentType::ImagePost).unwrap();
        assert_eq!(json, "\"image_post\"");
        let kind: ContentType = serde_json::from_str("\"comment\"").unwrap();
        assert_eq!(kind, ContentType::Comment);
    }

    #[test]
    fn test_author_display_prefers_name() {
        let item = ContentItem::text_post("POST-001", "USER-12345", "hi");
        assert_eq!(item.author_display(), "USER-12345");

        let item = item.with_author_name("GoodUser123");
        assert_eq!(item.author_display(), "GoodUser123");
    }

    #[test]
    fn test_media_only_item_has_empty_text() {
        let item = ContentItem::new("POST-003", "USER-54321", ContentType::ImagePost)
            .with_media_url("https://example.com/a.jpg");
        assert_eq!(item.text_or_empty(), "");
        assert!(item.content_type.has_media());
    }

    #[test]
    fn test_validate_rejects_empty_ids() {
        assert!(ContentItem::text_post("", "USER-1", "x").validate().is_err());
        assert!(ContentItem::text_post("POST-1", " ", "x").validate().is_err());
        assert!(ContentItem::text_post("POST-1", "USER-1", "x").validate().is_ok());
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let json = r#"{"id":"POST-9","author_id":"USER-9","content_type":"comment"}"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.content_type, ContentType::Comment);
        assert!(item.text.is_none());
        assert!(item.created_at.is_none());
    }
}
