//! Tracked resume e-mails: render the PDF, build tracked bodies, send once.
//!
//! PDF rendering is CPU-bound and runs on `tokio::task::spawn_blocking`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::pdf::{attachment_name, render_resume_pdf};

pub mod client;
pub mod handlers;
pub mod template;

use client::{Attachment, Mailer, OutgoingEmail};
use template::{EmailBody, TrackingLinks};

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("e-mail API error: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackedEmailRequest {
    pub to: String,
    pub to_name: Option<String>,
    pub from_name: String,
    pub from_email: Option<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
    pub resume_data: Option<ResumeData>,
    pub tracking_id: Option<String>,
    pub tracking_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentEmail {
    pub success: bool,
    pub email_id: String,
    pub tracking_id: String,
}

fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::MissingField(message.to_string()))
    } else {
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `Name <address>` using the verified sender address.
fn from_header(name: &str, address: &str) -> String {
    let name = name.trim().replace(['<', '>', '"'], "");
    if name.is_empty() {
        address.to_string()
    } else {
        format!("{name} <{address}>")
    }
}

pub async fn send_tracked_email(
    mailer: &dyn Mailer,
    sender_address: &str,
    request: TrackedEmailRequest,
) -> Result<SentEmail, AppError> {
    require(&request.to, "Recipient email is required")?;
    require(&request.subject, "Subject is required")?;
    require(&request.tracking_url, "Tracking URL is required")?;
    let resume = request
        .resume_data
        .ok_or_else(|| AppError::MissingField("Resume data is required".to_string()))?;

    let tracking_id = non_blank(request.tracking_id.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let filename = attachment_name(&resume);
    let pdf = tokio::task::spawn_blocking(move || render_resume_pdf(&resume))
        .await
        .context("PDF rendering task failed")??;

    let sender_name = non_blank(Some(request.from_name.as_str())).unwrap_or("Resume");
    let links = TrackingLinks::new(&request.tracking_url, &tracking_id);
    let body = EmailBody {
        recipient_name: request.to_name.as_deref(),
        sender_name,
        message: &request.body,
        links: &links,
    };

    let email = OutgoingEmail {
        from: from_header(sender_name, sender_address),
        to: request.to.trim().to_string(),
        reply_to: non_blank(request.reply_to.as_deref())
            .or_else(|| non_blank(request.from_email.as_deref()))
            .map(str::to_string),
        subject: request.subject.trim().to_string(),
        html: template::render_html(&body),
        text: template::render_text(&body),
        attachments: vec![Attachment {
            filename,
            content: pdf.bytes,
        }],
    };

    let email_id = mailer.send(email).await?;
    info!(
        "Tracked e-mail {} sent with tracking id {} ({} page PDF)",
        email_id, tracking_id, pdf.pages
    );

    Ok(SentEmail {
        success: true,
        email_id,
        tracking_id,
    })
}
