//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify_content;
pub mod run_moderation;
