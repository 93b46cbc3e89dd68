//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod classification_oracle;
pub mod human_review;
pub mod llm_gateway;
pub mod progress;
