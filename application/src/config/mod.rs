//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`OracleParams`]: which model classifies content and how long to wait
//! - [`PipelineParams`]: reviewer identity, oracle-failure fallback, review timeout

pub mod oracle_params;
pub mod pipeline_params;

pub use oracle_params::OracleParams;
pub use pipeline_params::{DEFAULT_REVIEWER, PipelineParams};
