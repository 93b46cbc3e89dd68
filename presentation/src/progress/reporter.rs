//! Progress reporting for moderation runs
//!
//! Progress goes to stderr so it never mixes with the review prompt or the
//! summary on stdout.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use moderation_application::ports::progress::ModerationProgressNotifier;
use moderation_domain::{ContentItem, ModerationResult, Resolution, ViolationAssessment};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Reports progress with a spinner while each item is classified
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    total: AtomicUsize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            total: AtomicUsize::new(0),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Stop the spinner so the next line (or the review prompt) is clean.
    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModerationProgressNotifier for ProgressReporter {
    fn on_batch_start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        eprintln!("{} Processing {} content item(s)", "->".cyan(), total);
    }

    fn on_item_start(&self, index: usize, item: &ContentItem) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("[{}/{}]", index + 1, self.total.load(Ordering::Relaxed)));
        pb.set_message(format!("Analyzing {} ({})", item.id, item.content_type));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_assessed(&self, item: &ContentItem, assessment: &ViolationAssessment) {
        self.clear_spinner();
        let verdict = if assessment.is_violation() {
            format!("{} ({})", assessment.category(), assessment.severity()).yellow()
        } else {
            "no violation".green()
        };
        eprintln!(
            "  {} {}: {} [confidence {:.2}]",
            "v".green(),
            item.id,
            verdict,
            assessment.confidence()
        );
    }

    fn on_oracle_failed(&self, item: &ContentItem, error: &str) {
        self.clear_spinner();
        eprintln!("  {} {}: classification failed: {}", "x".red(), item.id, error);
    }

    fn on_review_requested(&self, item: &ContentItem) {
        self.clear_spinner();
        eprintln!("  {} {}: requesting human review", "?".magenta(), item.id);
    }

    fn on_item_resolved(&self, result: &ModerationResult) {
        self.clear_spinner();
        let outcome = match result.resolution() {
            Resolution::Actioned { action } => action.as_str().to_uppercase().bold(),
            Resolution::Deferred { .. } => "DEFERRED".red().bold(),
        };
        eprintln!(
            "  {} {}: {} by {}",
            "=>".cyan(),
            result.content_id(),
            outcome,
            result.decided_by()
        );
    }

    fn on_batch_complete(&self, results: &[ModerationResult]) {
        self.clear_spinner();
        eprintln!(
            "{} Moderation complete: {} item(s)\n",
            "->".cyan(),
            results.len()
        );
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl ModerationProgressNotifier for SimpleProgress {
    fn on_batch_start(&self, total: usize) {
        eprintln!("Processing {} content item(s)", total);
    }

    fn on_item_start(&self, index: usize, item: &ContentItem) {
        eprintln!("[{}] Analyzing {} ({})", index + 1, item.id, item.content_type);
    }

    fn on_oracle_failed(&self, item: &ContentItem, error: &str) {
        eprintln!("  {} classification failed: {}", item.id, error);
    }

    fn on_item_resolved(&self, result: &ModerationResult) {
        let outcome = match result.action() {
            Some(action) => action.as_str().to_uppercase(),
            None => "DEFERRED".to_string(),
        };
        eprintln!("  {} -> {} by {}", result.content_id(), outcome, result.decided_by());
    }
}
