//! Transactional e-mail API client.
//!
//! The wire format follows the Resend `/emails` endpoint: one JSON POST with
//! bearer auth, attachments inlined as base64, `{ "id": ... }` on success.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EmailError;

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    /// Full `From` header, e.g. `Ada Lovelace <resumes@example.com>`.
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

/// Sends one e-mail and returns the provider's message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<String, EmailError>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WireAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct WireAttachment<'a> {
    filename: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(client: Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

fn wire_request(email: &OutgoingEmail) -> SendRequest<'_> {
    SendRequest {
        from: &email.from,
        to: vec![email.to.as_str()],
        subject: &email.subject,
        html: &email.html,
        text: &email.text,
        reply_to: email.reply_to.as_deref(),
        attachments: email
            .attachments
            .iter()
            .map(|a| WireAttachment {
                filename: &a.filename,
                content: STANDARD.encode(&a.content),
            })
            .collect(),
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<String, EmailError> {
        debug!(
            "Sending e-mail to {} with {} attachment(s)",
            email.to,
            email.attachments.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&wire_request(&email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("Unknown status");
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => format!("{status_text} ({})", err.message),
                Err(_) => status_text.to_string(),
            };
            return Err(EmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendResponse = response.json().await?;
        Ok(sent.id)
    }
}
