//! Progress notification port
//!
//! Defines the interface for reporting progress during a moderation run.

use moderation_domain::{ContentItem, ModerationResult, ViolationAssessment};

/// Callback for progress updates while a batch is moderated
///
/// Implementations live in the presentation layer. Every method has a no-op
/// default so adapters override only what they display.
pub trait ModerationProgressNotifier: Send + Sync {
    /// Called once before the first item
    fn on_batch_start(&self, _total: usize) {}

    /// Called when an item starts classification (`index` is 0-based)
    fn on_item_start(&self, _index: usize, _item: &ContentItem) {}

    /// Called when the oracle returned a valid assessment
    fn on_assessed(&self, _item: &ContentItem, _assessment: &ViolationAssessment) {}

    /// Called when the oracle call failed
    fn on_oracle_failed(&self, _item: &ContentItem, _error: &str) {}

    /// Called right before a human reviewer is asked
    fn on_review_requested(&self, _item: &ContentItem) {}

    /// Called when an item reaches a terminal result
    fn on_item_resolved(&self, _result: &ModerationResult) {}

    /// Called once after the last item
    fn on_batch_complete(&self, _results: &[ModerationResult]) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ModerationProgressNotifier for NoProgress {}
