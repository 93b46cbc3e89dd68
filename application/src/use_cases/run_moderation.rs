//! Run Moderation use case.
//!
//! Drives every submitted item through the moderation state machine:
//!
//! ```text
//! Pending ──assess ok──▶ Assessed ──category none──▶ Approved ──▶ Resolved
//!    │                      └──violation──▶ AwaitingHuman ──verdict──▶ Resolved
//!    └──oracle error──▶ Failed ──review──▶ AwaitingHuman
//!                          └──defer──▶ Resolved
//! ```
//!
//! Items are processed one at a time in submission order. The returned list
//! holds exactly one [`ModerationResult`] per item, in the same order.

use crate::config::PipelineParams;
use crate::ports::classification_oracle::{ClassificationOracle, OracleError};
use crate::ports::human_review::{HumanReviewError, HumanReviewPort, HumanVerdict, ReviewRequest};
use crate::ports::progress::{ModerationProgressNotifier, NoProgress};
use chrono::Utc;
use moderation_domain::{
    AUTO_APPROVED_NOTE, ContentItem, DecidedBy, DecisionPolicy, DomainError, ItemState,
    ModerationResult, OracleFailurePolicy, REVIEWED_NOTE, ReviewDecision, ViolationAssessment,
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a moderation run.
///
/// Per-item failures (oracle errors, invalid review input) never surface
/// here; they are resolved inside the batch.
#[derive(Error, Debug)]
pub enum RunModerationError {
    #[error("Invalid content item: {0}")]
    InvalidItem(#[from] DomainError),

    #[error("Duplicate content id: {0}")]
    DuplicateId(String),

    #[error("Illegal state transition for {content_id}: {source}")]
    IllegalTransition {
        content_id: String,
        source: DomainError,
    },

    /// The operator stopped the run. `results` holds everything resolved so far.
    #[error("Moderation cancelled after {} of {total} item(s)", .results.len())]
    Cancelled {
        results: Vec<ModerationResult>,
        total: usize,
    },
}

/// Why one item stopped the whole run.
enum Abort {
    /// The reviewer stopped the run.
    Cancelled,
    IllegalTransition {
        content_id: String,
        source: DomainError,
    },
}

/// Use case for moderating a batch of content items.
#[derive(Clone)]
pub struct RunModerationUseCase {
    oracle: Arc<dyn ClassificationOracle>,
    review: Arc<dyn HumanReviewPort>,
    policy: DecisionPolicy,
}

impl RunModerationUseCase {
    pub fn new(oracle: Arc<dyn ClassificationOracle>, review: Arc<dyn HumanReviewPort>) -> Self {
        Self {
            oracle,
            review,
            policy: DecisionPolicy::new(),
        }
    }

    /// Moderate `items` without progress reporting.
    pub async fn execute(
        &self,
        items: Vec<ContentItem>,
        params: &PipelineParams,
    ) -> Result<Vec<ModerationResult>, RunModerationError> {
        self.execute_with_progress(items, params, &NoProgress).await
    }

    /// Moderate `items`, reporting each transition to `progress`.
    pub async fn execute_with_progress(
        &self,
        items: Vec<ContentItem>,
        params: &PipelineParams,
        progress: &dyn ModerationProgressNotifier,
    ) -> Result<Vec<ModerationResult>, RunModerationError> {
        validate_batch(&items)?;

        let total = items.len();
        info!("Starting moderation of {} item(s)", total);
        progress.on_batch_start(total);

        let mut results = Vec::with_capacity(total);
        for (index, item) in items.into_iter().enumerate() {
            progress.on_item_start(index, &item);

            match self.moderate_item(item, params, progress).await {
                Ok(result) => {
                    progress.on_item_resolved(&result);
                    results.push(result);
                }
                Err(Abort::Cancelled) => {
                    warn!("Moderation cancelled at item {} of {}", index + 1, total);
                    return Err(RunModerationError::Cancelled { results, total });
                }
                Err(Abort::IllegalTransition { content_id, source }) => {
                    return Err(RunModerationError::IllegalTransition { content_id, source });
                }
            }
        }

        progress.on_batch_complete(&results);
        info!("Moderation complete: {} result(s)", results.len());
        Ok(results)
    }

    /// Runs one item to a terminal result. Only a cancel or a broken state
    /// machine escapes.
    async fn moderate_item(
        &self,
        item: ContentItem,
        params: &PipelineParams,
        progress: &dyn ModerationProgressNotifier,
    ) -> Result<ModerationResult, Abort> {
        let mut state = ItemState::Pending;

        match self.oracle.assess(&item).await {
            Ok(assessment) => {
                advance(&item, &mut state, ItemState::Assessed)?;
                progress.on_assessed(&item, &assessment);

                match self.policy.decide(&assessment) {
                    ReviewDecision::AutoApprove => {
                        advance(&item, &mut state, ItemState::Approved)?;
                        advance(&item, &mut state, ItemState::Resolved)?;
                        Ok(ModerationResult::auto_approved(item, assessment, Utc::now())
                            .with_note(AUTO_APPROVED_NOTE))
                    }
                    ReviewDecision::NeedsReview => {
                        advance(&item, &mut state, ItemState::AwaitingHuman)?;
                        let request =
                            ReviewRequest::for_assessment(item, assessment, &params.reviewer);
                        let result = self.review(request, params, progress).await?;
                        advance(result.item(), &mut state, ItemState::Resolved)?;
                        Ok(result)
                    }
                }
            }
            Err(error) => {
                advance(&item, &mut state, ItemState::Failed)?;
                warn!("Classification failed for {} ({}): {}", item.id, error.kind(), error);
                progress.on_oracle_failed(&item, &error.to_string());
                self.fall_back(item, error, &mut state, params, progress).await
            }
        }
    }

    async fn fall_back(
        &self,
        item: ContentItem,
        error: OracleError,
        state: &mut ItemState,
        params: &PipelineParams,
        progress: &dyn ModerationProgressNotifier,
    ) -> Result<ModerationResult, Abort> {
        let failure = format!("classification failed ({}): {}", error.kind(), error);

        match params.on_oracle_failure {
            OracleFailurePolicy::Review => {
                advance(&item, state, ItemState::AwaitingHuman)?;
                let request = ReviewRequest::for_failure(item, failure.clone(), &params.reviewer);
                let result = self.review(request, params, progress).await?;
                advance(result.item(), state, ItemState::Resolved)?;
                Ok(result.with_note(failure))
            }
            OracleFailurePolicy::Defer => {
                advance(&item, state, ItemState::Resolved)?;
                Ok(ModerationResult::deferred(
                    item,
                    None,
                    DecidedBy::AiSystem,
                    failure,
                    Utc::now(),
                ))
            }
        }
    }

    /// Asks the reviewer and turns the answer into a result.
    ///
    /// Any failure except `Cancelled` resolves the item as deferred.
    async fn review(
        &self,
        request: ReviewRequest,
        params: &PipelineParams,
        progress: &dyn ModerationProgressNotifier,
    ) -> Result<ModerationResult, Abort> {
        progress.on_review_requested(&request.item);

        let outcome = match params.review_timeout {
            Some(limit) => tokio::time::timeout(limit, self.review.request_decision(&request))
                .await
                .unwrap_or(Err(HumanReviewError::Timeout(limit))),
            None => self.review.request_decision(&request).await,
        };

        let ReviewRequest {
            item,
            assessment,
            reviewer,
            ..
        } = request;

        match outcome {
            Ok(HumanVerdict { action, reviewer }) => {
                info!("{}", action.confirmation(&item.id, &reviewer));
                Ok(ModerationResult::reviewed(
                    item,
                    assessment,
                    action,
                    reviewer,
                    Utc::now(),
                )
                .with_note(REVIEWED_NOTE))
            }
            Err(HumanReviewError::Cancelled) => Err(Abort::Cancelled),
            Err(error) => {
                warn!("Review of {} could not complete: {}", item.id, error);
                Ok(deferred_review(item, assessment, reviewer, &error))
            }
        }
    }
}

fn deferred_review(
    item: ContentItem,
    assessment: Option<ViolationAssessment>,
    reviewer: String,
    error: &HumanReviewError,
) -> ModerationResult {
    ModerationResult::deferred(
        item,
        assessment,
        DecidedBy::human(reviewer),
        error.to_string(),
        Utc::now(),
    )
}

/// Moves `state` along an allowed edge.
fn advance(item: &ContentItem, state: &mut ItemState, next: ItemState) -> Result<(), Abort> {
    let moved = state
        .transition(next)
        .map_err(|source| Abort::IllegalTransition {
            content_id: item.id.clone(),
            source,
        })?;
    debug!("{}: {} -> {}", item.id, state, moved);
    if moved.is_terminal() {
        debug!(content_id = %item.id, "Item resolved");
    }
    *state = moved;
    Ok(())
}

/// Rejects the whole batch before any oracle call if an item is malformed.
fn validate_batch(items: &[ContentItem]) -> Result<(), RunModerationError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        item.validate()?;
        if !seen.insert(item.id.as_str()) {
            return Err(RunModerationError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}
