//! Output formatting for moderation summaries

pub mod formatter;
pub mod summary;
