//! User-generated content submitted for moderation.

pub mod entities;

pub use entities::{ContentItem, ContentType};
