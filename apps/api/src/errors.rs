use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::EditError;
use crate::email::EmailError;
use crate::llm_client::LlmError;
use crate::pdf::PdfError;
use crate::session::AuthError;
use crate::settings::KeyStoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{ "error": "<message>" }`. Request-level failures
/// are reported as 500 like upstream failures; callers only distinguish success
/// from failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    MissingField(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    Edit(#[from] EditError),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    UnparseableResponse(String),

    #[error("Failed to send email: {0}")]
    Email(String),

    #[error("Failed to generate PDF: {0}")]
    Pdf(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(_) | LlmError::NoJson => AppError::UnparseableResponse(format!(
                "Failed to parse AI response: {err}"
            )),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        AppError::Email(err.to_string())
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        AppError::Pdf(err.to_string())
    }
}

impl From<KeyStoreError> for AppError {
    fn from(err: KeyStoreError) -> Self {
        match err {
            KeyStoreError::EmptyKey => AppError::MissingField(err.to_string()),
            KeyStoreError::UnknownProvider(name) => {
                AppError::NotFound(format!("provider '{name}'"))
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => AppError::MissingField(err.to_string()),
            AuthError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::MissingField(msg) | AppError::InvalidBody(msg) => {
                tracing::warn!("Rejected request: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Edit(e) => {
                tracing::warn!("Rejected edit: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Upstream(msg) | AppError::UnparseableResponse(msg) => {
                tracing::error!("AI upstream error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Email(msg) => {
                tracing::error!("Email error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_field_is_500_with_verbatim_message() {
        let (status, body) =
            body_of(AppError::MissingField("Job description is required".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Job description is required" }));
    }

    #[tokio::test]
    async fn test_upstream_status_text_is_surfaced() {
        let err: AppError = LlmError::Api {
            provider: "OpenAI",
            status: 429,
            message: "Too Many Requests".into(),
        }
        .into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Too Many Requests"));
    }

    #[tokio::test]
    async fn test_not_found_is_404() {
        let (status, _) = body_of(AppError::NotFound("provider 'x'".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
