//! Human review adapters that do not need a terminal

mod channel;
mod json_lines;

pub use channel::{ChannelHumanReview, ReviewReply, ReviewTicket};
pub use json_lines::serve_json_lines;
