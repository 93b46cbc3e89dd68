//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the LLM used by the classification oracle
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: display helpers (character-safe truncation)

pub mod error;
pub mod model;
pub mod string;
