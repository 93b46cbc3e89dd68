//! Prompt domain
//!
//! Templates for the two texts the pipeline produces for someone else to
//! read: the classification prompt sent to the oracle, and the review
//! prompt shown to a human moderator.

mod template;

pub use template::ModerationPromptTemplate;
