//! Channel-based human review gate
//!
//! Hands each review request to another task (a web handler, a queue
//! consumer, a test) as a [`ReviewTicket`] over `tokio::mpsc`, then waits on
//! the ticket's `oneshot` reply. The pipeline stays suspended until the
//! reviewer answers, closes the channel, or cancels.

use async_trait::async_trait;
use moderation_application::ports::human_review::{
    parse_reply, HumanReviewError, HumanReviewPort, HumanVerdict, ReviewRequest,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// What a remote reviewer sends back.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewReply {
    /// Free text, parsed against the action vocabulary
    Text(String),
    /// Stop the whole moderation run
    Cancel,
}

/// One pending question for a reviewer.
#[derive(Debug)]
pub struct ReviewTicket {
    pub request: ReviewRequest,
    /// 1-based; greater than 1 after an unrecognized reply
    pub attempt: u32,
    reply: oneshot::Sender<ReviewReply>,
}

impl ReviewTicket {
    /// Answer with free text. Fails if the gate stopped waiting.
    pub fn answer(self, text: impl Into<String>) -> Result<(), ReviewReply> {
        self.reply.send(ReviewReply::Text(text.into()))
    }

    /// Cancel the moderation run.
    pub fn cancel(self) -> Result<(), ReviewReply> {
        self.reply.send(ReviewReply::Cancel)
    }

    /// Resolves once the gate has stopped waiting for this ticket
    /// (review timeout, cancelled run).
    pub async fn closed(&mut self) {
        self.reply.closed().await
    }
}

/// [`HumanReviewPort`] backed by a ticket channel.
pub struct ChannelHumanReview {
    tickets: mpsc::Sender<ReviewTicket>,
    max_attempts: u32,
}

impl ChannelHumanReview {
    /// Create the gate and the receiving end reviewers pull tickets from.
    pub fn channel(buffer: usize, max_attempts: u32) -> (Self, mpsc::Receiver<ReviewTicket>) {
        let (tickets, receiver) = mpsc::channel(buffer.max(1));
        (
            Self {
                tickets,
                max_attempts: max_attempts.max(1),
            },
            receiver,
        )
    }
}

#[async_trait]
impl HumanReviewPort for ChannelHumanReview {
    async fn request_decision(
        &self,
        request: &ReviewRequest,
    ) -> Result<HumanVerdict, HumanReviewError> {
        let mut last_input = String::new();

        for attempt in 1..=self.max_attempts {
            let (reply_tx, reply_rx) = oneshot::channel();
            let ticket = ReviewTicket {
                request: request.clone(),
                attempt,
                reply: reply_tx,
            };

            self.tickets
                .send(ticket)
                .await
                .map_err(|_| HumanReviewError::ChannelClosed)?;
            debug!("Review ticket for {} sent (attempt {})", request.item.id, attempt);

            let reply = reply_rx
                .await
                .map_err(|_| HumanReviewError::ChannelClosed)?;

            match reply {
                ReviewReply::Cancel => return Err(HumanReviewError::Cancelled),
                ReviewReply::Text(text) => match parse_reply(&text) {
                    Ok(action) => {
                        return Ok(HumanVerdict {
                            action,
                            reviewer: request.reviewer.clone(),
                        });
                    }
                    Err(input) => {
                        warn!(
                            "Unrecognized review reply '{}' for {} ({}/{})",
                            input, request.item.id, attempt, self.max_attempts
                        );
                        last_input = input;
                    }
                },
            }
        }

        Err(HumanReviewError::InvalidAction {
            attempts: self.max_attempts,
            last_input,
        })
    }
}
