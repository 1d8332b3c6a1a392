//! Completion sentinel extraction.
//!
//! The interview protocol is in-band: when the assistant is ready, it wraps
//! the finished document in `[COMPLETE] ... [/COMPLETE]` markers inside an
//! otherwise ordinary text response. Extraction takes the text strictly
//! between the first opening and first closing sentinel (non-greedy). A
//! response without a well-formed, non-empty sentinel pair is an ordinary
//! mid-dialogue message, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening completion sentinel, verbatim.
pub const COMPLETION_OPEN: &str = "[COMPLETE]";

/// Closing completion sentinel, verbatim.
pub const COMPLETION_CLOSE: &str = "[/COMPLETE]";

static COMPLETION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[COMPLETE\](.*?)\[/COMPLETE\]").expect("completion sentinel regex is valid")
});

/// Tagged result of scanning an assistant response for the sentinel pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// No usable sentinel pair; the text is an ordinary assistant message.
    MidDialogue(String),
    /// A finished document was extracted (trimmed, sentinel-free, non-empty).
    Complete(String),
}

/// Scans a raw assistant response for the completion sentinel pair.
pub fn parse_completion(raw: &str) -> CompletionOutcome {
    match COMPLETION_RE.captures(raw) {
        Some(captures) => {
            let document = captures[1].trim();
            if document.is_empty() {
                // A sentinel pair around nothing is malformed; give the
                // conversation a chance to self-correct on the next turn.
                CompletionOutcome::MidDialogue(raw.to_string())
            } else {
                CompletionOutcome::Complete(document.to_string())
            }
        }
        None => CompletionOutcome::MidDialogue(raw.to_string()),
    }
}
