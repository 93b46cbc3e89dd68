//! Interactive console review for flagged content.
//!
//! When an item needs a human decision, the moderator sees:
//!
//! ```text
//! ═══════════════════════════════════════════════════════════════
//!   Content Requires Human Review
//! ═══════════════════════════════════════════════════════════════
//! CONTENT MODERATION REVIEW REQUIRED
//!
//! Content ID: POST-002
//! Posted by: PoliticalRanter42
//! ...
//! THIS CONTENT REQUIRES HUMAN REVIEW BEFORE TAKING ACTION.
//!
//! Senior Moderator Johnson, what action should be taken? (approve/warn/restrict/remove):
//! ```
//!
//! Replies are matched case-insensitively. An unrecognized reply re-prompts
//! until `max_attempts` is used up; end of input cancels the run.
//!
//! Stdin is read by one background thread for the life of the process and
//! handed over line by line. A review abandoned mid-wait (a review timeout)
//! holds no lock and consumes nothing, so the next line goes to the next
//! review.

use async_trait::async_trait;
use colored::Colorize;
use moderation_application::ports::human_review::{
    parse_reply, HumanReviewError, HumanReviewPort, HumanVerdict, ReviewRequest,
};
use moderation_domain::ModerationAction;
use std::io::{self, BufRead, Write};
use tokio::sync::{mpsc, Mutex};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// Lines buffered between the stdin thread and the reviewer
const LINE_BUFFER: usize = 16;

/// Terminal-based [`HumanReviewPort`].
///
/// Reads replies from a line channel (stdin by default) and writes prompts
/// to `W` (stdout by default).
pub struct ConsoleHumanReview<W = io::Stdout> {
    console: Mutex<Console<W>>,
    max_attempts: u32,
}

struct Console<W> {
    lines: mpsc::Receiver<String>,
    output: W,
}

impl ConsoleHumanReview {
    /// Review on the terminal: stdin in, stdout out.
    pub fn new(max_attempts: u32) -> io::Result<Self> {
        Ok(Self::with_io(stdin_lines()?, io::stdout(), max_attempts))
    }
}

impl<W: Write + Send> ConsoleHumanReview<W> {
    pub fn with_io(lines: mpsc::Receiver<String>, output: W, max_attempts: u32) -> Self {
        Self {
            console: Mutex::new(Console { lines, output }),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.console.into_inner().output
    }
}

#[async_trait]
impl<W: Write + Send + 'static> HumanReviewPort for ConsoleHumanReview<W> {
    async fn request_decision(
        &self,
        request: &ReviewRequest,
    ) -> Result<HumanVerdict, HumanReviewError> {
        let mut console = self.console.lock().await;
        let Console { lines, output } = &mut *console;
        review_session(lines, output, request, self.max_attempts).await
    }
}

/// Stdin as a channel of lines, read on a dedicated thread.
///
/// The channel closes at end of input or on a read error.
pub fn stdin_lines() -> io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    std::thread::Builder::new()
        .name("review-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Show the request, then take replies until one names an action.
pub async fn review_session<W: Write + Send>(
    lines: &mut mpsc::Receiver<String>,
    output: &mut W,
    request: &ReviewRequest,
    max_attempts: u32,
) -> Result<HumanVerdict, HumanReviewError> {
    display_request(output, request).map_err(io_error)?;

    let mut last_input = String::new();
    for attempt in 1..=max_attempts {
        write!(output, "{} ", request.question().magenta().bold()).map_err(io_error)?;
        output.flush().map_err(io_error)?;

        let Some(line) = lines.recv().await else {
            writeln!(output).map_err(io_error)?;
            return Err(HumanReviewError::Cancelled);
        };

        match parse_reply(&line) {
            Ok(action) => {
                confirm(output, action, request).map_err(io_error)?;
                return Ok(HumanVerdict {
                    action,
                    reviewer: request.reviewer.clone(),
                });
            }
            Err(reply) => {
                writeln!(
                    output,
                    "{} '{}' is not an action. Please enter one of: {} ({}/{})",
                    "x".red(),
                    reply,
                    ModerationAction::vocabulary(),
                    attempt,
                    max_attempts
                )
                .map_err(io_error)?;
                last_input = reply;
            }
        }
    }

    Err(HumanReviewError::InvalidAction {
        attempts: max_attempts,
        last_input,
    })
}

fn display_request<W: Write>(output: &mut W, request: &ReviewRequest) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", RULE.yellow().bold())?;
    writeln!(output, "{}", "  Content Requires Human Review".yellow().bold())?;
    writeln!(output, "{}", RULE.yellow().bold())?;
    writeln!(output, "{}", request.prompt_text())?;
    Ok(())
}

fn confirm<W: Write>(
    output: &mut W,
    action: ModerationAction,
    request: &ReviewRequest,
) -> io::Result<()> {
    let message = action.confirmation(&request.item.id, &request.reviewer);
    let line = match action {
        ModerationAction::Approve => message.green(),
        ModerationAction::Warn => message.yellow(),
        ModerationAction::Restrict | ModerationAction::Remove => message.red(),
    };
    writeln!(output, "{}", line)
}

fn io_error(e: io::Error) -> HumanReviewError {
    HumanReviewError::IoError(e.to_string())
}
