//! Mail transport capability trait.
//!
//! Delivery goes to one fixed recipient; there is no safe fallback when the
//! transport is unconfigured, so that case is a distinct error rather than a
//! silent degradation.

use async_trait::async_trait;
use thiserror::Error;

/// The fixed recipient for every idea submission.
pub const RECIPIENT_EMAIL: &str = "product-ideas@meridianlending.com";

/// Display name used in the From header and email chrome.
pub const MAIL_DISPLAY_NAME: &str = "IdeaRelay";

/// A fully rendered outbound email (addressing is the transport's concern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Errors a mail transport can surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// SMTP credentials are missing; a configuration problem, not transient.
    #[error("email service is not configured")]
    NotConfigured,

    /// The transport accepted the message but delivery failed.
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Sends a rendered email to the fixed recipient.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}
