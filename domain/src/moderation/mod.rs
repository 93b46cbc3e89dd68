//! Moderation decisions: terminal actions, the decision policy, the per-item
//! state machine, and the immutable result record.

pub mod action;
pub mod policy;
pub mod result;
pub mod state;

pub use action::ModerationAction;
pub use policy::{DecisionPolicy, OracleFailurePolicy, ReviewDecision};
pub use result::{
    AI_SYSTEM, AUTO_APPROVED_NOTE, DecidedBy, ModerationResult, REVIEWED_NOTE, Resolution,
};
pub use state::ItemState;
