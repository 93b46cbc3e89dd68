//! Presentation layer for content-moderation
//!
//! This crate contains CLI definitions, the interactive review prompt,
//! progress reporters, and summary formatters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod review;

// Re-export commonly used types
pub use cli::commands::{Cli, OracleChoice, OutputFormat, ReviewMode};
pub use output::formatter::{SummaryFormatter, formatter_for};
pub use output::summary::{JsonSummary, SummaryReporter};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use review::console::{ConsoleHumanReview, review_session, stdin_lines};
