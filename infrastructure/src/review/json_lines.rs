//! JSON-lines reviewer for the ticket channel
//!
//! Writes every [`ReviewTicket`] as one JSON object per line and answers it
//! with the next input line, so a separate process (a web bridge, a queue
//! worker, a script) can act as the moderator over a pipe:
//!
//! ```text
//! > {"content_id":"POST-002","attempt":1,"reviewer":"Senior Moderator Johnson",...}
//! < warn
//! ```
//!
//! The reply `cancel` stops the run. End of input cancels every open ticket.

use super::channel::ReviewTicket;
use serde::Serialize;
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing::debug;

const CANCEL: &str = "cancel";

#[derive(Debug, Serialize)]
struct TicketLine<'a> {
    content_id: &'a str,
    attempt: u32,
    reviewer: &'a str,
    prompt: String,
    question: String,
}

impl<'a> From<&'a ReviewTicket> for TicketLine<'a> {
    fn from(ticket: &'a ReviewTicket) -> Self {
        Self {
            content_id: &ticket.request.item.id,
            attempt: ticket.attempt,
            reviewer: &ticket.request.reviewer,
            prompt: ticket.request.prompt_text(),
            question: ticket.request.question(),
        }
    }
}

/// Serve tickets until the gate is dropped, then hand back `output`.
///
/// A ticket the gate abandons while waiting is skipped without taking a
/// line, so the reply goes to the next ticket.
pub async fn serve_json_lines<W: Write + Send>(
    mut tickets: mpsc::Receiver<ReviewTicket>,
    mut lines: mpsc::Receiver<String>,
    mut output: W,
) -> io::Result<W> {
    while let Some(mut ticket) = tickets.recv().await {
        let line = serde_json::to_string(&TicketLine::from(&ticket)).map_err(io::Error::other)?;
        writeln!(output, "{}", line)?;
        output.flush()?;

        let reply = tokio::select! {
            biased;
            _ = ticket.closed() => {
                debug!("Review ticket abandoned before a reply");
                continue;
            }
            reply = lines.recv() => reply,
        };

        let delivered = match reply {
            Some(text) if text.trim().eq_ignore_ascii_case(CANCEL) => ticket.cancel(),
            Some(text) => ticket.answer(text),
            None => ticket.cancel(),
        };
        if delivered.is_err() {
            debug!("Review reply arrived after the gate stopped waiting");
        }
    }

    Ok(output)
}
