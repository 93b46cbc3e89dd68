//! Per-item processing state machine
//!
//! ```text
//! PENDING ──oracle ok──▶ ASSESSED ──auto-approve──▶ APPROVED ──▶ RESOLVED
//!    │                      └──needs review──▶ AWAITING_HUMAN ──▶ RESOLVED
//!    └──oracle error──▶ FAILED ──review fallback──▶ AWAITING_HUMAN
//!                          └──defer fallback──▶ RESOLVED
//! ```

use crate::core::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Assessed,
    Approved,
    AwaitingHuman,
    Failed,
    Resolved,
}

impl ItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::Pending => "pending",
            ItemState::Assessed => "assessed",
            ItemState::Approved => "approved",
            ItemState::AwaitingHuman => "awaiting_human",
            ItemState::Failed => "failed",
            ItemState::Resolved => "resolved",
        }
    }

    pub fn can_transition_to(&self, next: ItemState) -> bool {
        use ItemState::*;
        matches!(
            (self, next),
            (Pending, Assessed)
                | (Pending, Failed)
                | (Assessed, Approved)
                | (Assessed, AwaitingHuman)
                | (Approved, Resolved)
                | (AwaitingHuman, Resolved)
                | (Failed, AwaitingHuman)
                | (Failed, Resolved)
        )
    }

    /// Move to `next`, rejecting edges the machine does not have.
    pub fn transition(self, next: ItemState) -> Result<ItemState, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == ItemState::Resolved
    }
}

impl Default for ItemState {
    fn default() -> Self {
        ItemState::Pending
    }
}

impl std::fmt::Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
