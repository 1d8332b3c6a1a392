//! SMTP implementation of the mail transport.
//!
//! Configuration priority: ~/.config/idearelay/secret.json > environment
//! variables (SMTP_USER, SMTP_PASSWORD, SMTP_HOST, SMTP_PORT). Missing
//! credentials surface as `MailError::NotConfigured`, which callers treat
//! differently from a transient delivery failure.

use crate::storage::{SecretStorage, SmtpSecret};
use async_trait::async_trait;
use idearelay_core::mail::{
    MAIL_DISPLAY_NAME, MailError, MailTransport, OutboundEmail, RECIPIENT_EMAIL,
};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Sends submission emails over an authenticated STARTTLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Builds a mailer from the secret file or environment variables.
    pub fn try_from_env() -> Result<Self, MailError> {
        let secret = Self::load_credentials().ok_or(MailError::NotConfigured)?;
        Self::from_secret(secret)
    }

    fn load_credentials() -> Option<SmtpSecret> {
        if let Ok(storage) = SecretStorage::new() {
            if let Ok(config) = storage.load() {
                if let Some(smtp) = config.smtp {
                    return Some(smtp);
                }
            }
        }

        let user = env::var("SMTP_USER").ok()?;
        let password = env::var("SMTP_PASSWORD").ok()?;
        Some(SmtpSecret {
            user,
            password,
            host: env::var("SMTP_HOST").ok(),
            port: env::var("SMTP_PORT").ok().and_then(|port| port.parse().ok()),
        })
    }

    fn from_secret(secret: SmtpSecret) -> Result<Self, MailError> {
        let host = secret.host.as_deref().unwrap_or(DEFAULT_SMTP_HOST);
        let port = secret.port.unwrap_or(DEFAULT_SMTP_PORT);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|err| MailError::Delivery(format!("invalid SMTP relay: {err}")))?
            .port(port)
            .credentials(Credentials::new(secret.user.clone(), secret.password))
            .build();

        let from = format!("{MAIL_DISPLAY_NAME} <{}>", secret.user)
            .parse()
            .map_err(|err| MailError::Delivery(format!("invalid sender address: {err}")))?;
        let to = RECIPIENT_EMAIL
            .parse()
            .map_err(|err| MailError::Delivery(format!("invalid recipient address: {err}")))?;

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|err| MailError::Delivery(format!("failed to build message: {err}")))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|err| MailError::Delivery(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secret_uses_defaults() {
        let mailer = SmtpMailer::from_secret(SmtpSecret {
            user: "relay@meridianlending.com".to_string(),
            password: "hunter2".to_string(),
            host: None,
            port: None,
        });
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_invalid_sender_is_rejected() {
        let mailer = SmtpMailer::from_secret(SmtpSecret {
            user: "not an address".to_string(),
            password: "hunter2".to_string(),
            host: None,
            port: None,
        });
        assert!(matches!(mailer, Err(MailError::Delivery(_))));
    }
}
