//! Output formatter trait

use super::summary::{JsonSummary, SummaryReporter};
use moderation_domain::{ModerationResult, OutputFormat};

/// Trait for formatting the end-of-run summary
pub trait SummaryFormatter {
    fn format(&self, results: &[ModerationResult]) -> String;
}

/// Pick the formatter for a configured output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn SummaryFormatter> {
    match format {
        OutputFormat::Text => Box::new(SummaryReporter),
        OutputFormat::Json => Box::new(JsonSummary),
    }
}
