//! Submission flow: render the finished idea as an email and deliver it.
//!
//! The document is rendered twice from the same content, once as plain
//! text and once as inline-styled HTML (mail clients ignore stylesheets),
//! and sent to the fixed recipient. An empty document is rejected before
//! the transport is touched.

use idearelay_core::catalog;
use idearelay_core::error::{RelayError, Result};
use idearelay_core::mail::{MailError, MailTransport, OutboundEmail};
use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

const EMAIL_TEMPLATE_NAME: &str = "submission_email";

const EMAIL_TEMPLATE: &str = r#"<div style="font-family:'Segoe UI',Arial,sans-serif;max-width:700px;margin:0 auto;background:#1a2332;border-radius:12px;overflow:hidden;border:1px solid rgba(155,197,61,0.2);">
  <div style="background:#2b3e50;padding:24px 32px;border-bottom:3px solid #9bc53d;">
    <table style="width:100%;">
      <tr>
        <td>
          <span style="font-size:28px;font-weight:800;color:#9bc53d;letter-spacing:-0.5px;">Meridian</span>
          <br>
          <span style="font-size:11px;font-weight:600;color:#64748b;letter-spacing:1px;text-transform:uppercase;">Lending</span>
        </td>
        <td style="text-align:right;">
          <span style="font-size:18px;font-weight:700;color:#f0f4f8;">IdeaRelay</span>
          <br>
          <span style="font-size:11px;color:#64748b;">Idea Submission</span>
        </td>
      </tr>
    </table>
  </div>
  <div style="padding:20px 32px;background:#1f2b3d;border-bottom:1px solid rgba(148,163,184,0.1);">
    {% if submitter %}<p style="font-size:14px;color:#64748b;margin:0 0 4px 0;">Submitted by: <strong style="color:#f0f4f8;">{{ submitter }}</strong></p>
    {% endif %}<p style="font-size:14px;color:#64748b;margin:0 0 4px 0;">Category: <strong style="color:#9bc53d;">{{ category_list }}</strong></p>
    <p style="font-size:12px;color:#64748b;margin:0;">Submitted: {{ submitted_at }}</p>
  </div>
  <div style="padding:28px 32px;">
    <p style="color:#94a3b8;line-height:1.7;margin:0 0 10px 0;">
      {{ body_html }}
    </p>
  </div>
  <div style="padding:16px 32px;background:#1f2b3d;border-top:1px solid rgba(148,163,184,0.1);text-align:center;">
    <p style="font-size:11px;color:#64748b;margin:0;">
      Submitted via <strong style="color:#9bc53d;">IdeaRelay</strong> &mdash; Voice Your Ideas
    </p>
  </div>
</div>"#;

static EMAIL_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template(EMAIL_TEMPLATE_NAME, EMAIL_TEMPLATE)
        .expect("submission email template is valid");
    env
});

static RE_H3: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^### (.+)$").expect("h3 regex is valid"));
static RE_H2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## (.+)$").expect("h2 regex is valid"));
static RE_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").expect("h1 regex is valid"));
static RE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid"));
static RE_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.+?)\*").expect("italic regex is valid"));
static RE_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^- (.+)$").expect("list item regex is valid"));
static RE_LIST_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:<li[^\n]*</li>\n?)+").expect("list run regex is valid"));

/// Escapes the three HTML-significant characters.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Converts the markdown-ish submission into inline-styled HTML.
///
/// Only the constructs the generators emit are handled: ATX headings,
/// bold/italic, dashed list items, and blank-line paragraph breaks.
fn markdownish_to_html(document: &str) -> String {
    let mut html = escape_html(document);
    html = RE_H3
        .replace_all(&html, "<h3 style=\"color:#9bc53d;font-size:16px;margin:16px 0 8px 0;font-weight:600;\">$1</h3>")
        .into_owned();
    html = RE_H2
        .replace_all(&html, "<h2 style=\"color:#9bc53d;font-size:18px;margin:20px 0 10px 0;font-weight:700;border-bottom:1px solid rgba(155,197,61,0.3);padding-bottom:6px;\">$1</h2>")
        .into_owned();
    html = RE_H1
        .replace_all(&html, "<h1 style=\"color:#f0f4f8;font-size:22px;margin:0 0 16px 0;font-weight:800;\">$1</h1>")
        .into_owned();
    html = RE_BOLD
        .replace_all(&html, "<strong style=\"color:#f0f4f8;\">$1</strong>")
        .into_owned();
    html = RE_ITALIC.replace_all(&html, "<em>$1</em>").into_owned();
    html = RE_LIST_ITEM
        .replace_all(&html, "<li style=\"margin:4px 0;color:#94a3b8;\">$1</li>")
        .into_owned();
    html = RE_LIST_RUN
        .replace_all(&html, |caps: &regex::Captures| {
            format!(
                "<ul style=\"padding-left:20px;margin:8px 0;\">{}</ul>",
                &caps[0]
            )
        })
        .into_owned();
    html = html.replace(
        "\n\n",
        "</p><p style=\"color:#94a3b8;line-height:1.7;margin:10px 0;\">",
    );
    html.replace('\n', "<br>")
}

/// Renders the subject, plain-text, and HTML bodies for a submission.
fn render_email(
    document: &str,
    categories: &[String],
    submitter: Option<&str>,
    submitted_at: &str,
) -> Result<OutboundEmail> {
    let category_list = if categories.is_empty() {
        "General".to_string()
    } else {
        categories
            .iter()
            .map(|id| catalog::label_of(id))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let from_clause = submitter
        .map(|email| format!(" from {email}"))
        .unwrap_or_default();
    let subject = format!("IdeaRelay Idea Submission{from_clause} - {category_list}");

    let text_body = format!(
        "IdeaRelay Idea Submission\n\n{}Category: {}\nDate: {}\n\n{}",
        submitter
            .map(|email| format!("From: {email}\n"))
            .unwrap_or_default(),
        category_list,
        submitted_at,
        document
    );

    let html_body = EMAIL_ENV
        .get_template(EMAIL_TEMPLATE_NAME)
        .map_err(|err| RelayError::internal(err.to_string()))?
        .render(context! {
            submitter => submitter.map(escape_html),
            category_list => escape_html(&category_list),
            submitted_at => submitted_at,
            body_html => markdownish_to_html(document),
        })
        .map_err(|err| RelayError::internal(err.to_string()))?;

    Ok(OutboundEmail {
        subject,
        text_body,
        html_body,
    })
}

/// Orchestrates one idea submission.
pub struct SubmissionService {
    transport: Option<Arc<dyn MailTransport>>,
}

impl SubmissionService {
    /// Creates the service. `transport: None` means mail is unconfigured;
    /// unlike the LLM path there is no safe fallback for delivery, so that
    /// state surfaces as a distinct configuration error.
    pub fn new(transport: Option<Arc<dyn MailTransport>>) -> Self {
        Self { transport }
    }

    /// Validates, renders, and delivers a submission.
    pub async fn submit(
        &self,
        document: &str,
        categories: &[String],
        submitter: Option<&str>,
    ) -> Result<()> {
        if document.trim().is_empty() {
            return Err(RelayError::validation("No idea content provided"));
        }

        let transport = self
            .transport
            .as_ref()
            .ok_or(RelayError::not_configured("email"))?;

        let submitted_at = chrono::Utc::now().format("%B %d, %Y %H:%M UTC").to_string();
        let email = render_email(document, categories, submitter, &submitted_at)?;

        transport.send(&email).await.map_err(|err| match err {
            MailError::NotConfigured => RelayError::not_configured("email"),
            MailError::Delivery(message) => {
                tracing::error!(error = %message, "submission delivery failed");
                RelayError::collaborator("Failed to submit idea. Please try again.")
            }
        })
    }
}
