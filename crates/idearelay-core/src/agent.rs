//! Completion agent capability trait.
//!
//! The LLM call is a black-box asynchronous text completion behind a narrow
//! interface, so the dialogue and assembly logic can be tested with
//! deterministic fakes instead of live network calls. A single failed call
//! surfaces as an error to the caller; there is no retry inside the trait.

use crate::message::ChatMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Errors a completion agent can surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// No credential is configured for the completion service.
    #[error("completion service is not configured")]
    NotConfigured,

    /// The request failed at the HTTP layer or the API returned an error.
    #[error("completion request failed: {message}")]
    Process {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The response could not be parsed.
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),

    /// The response parsed but contained no text.
    #[error("completion response contained no text")]
    EmptyResponse,
}

impl AgentError {
    /// Creates a non-retryable process error without an HTTP status.
    pub fn process(message: impl Into<String>) -> Self {
        Self::Process {
            status_code: None,
            message: message.into(),
            is_retryable: false,
        }
    }

    /// Whether retrying the identical request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Process { is_retryable: true, .. })
    }
}

/// A black-box text completion service.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    /// Sends the full message list and returns the assistant's text.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, AgentError>;
}
