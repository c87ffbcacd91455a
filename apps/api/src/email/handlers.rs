use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::email::{send_tracked_email, SentEmail, TrackedEmailRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/send-tracked-email
///
/// Failures are logged by `AppError` when the response is built.
pub async fn handle_send_tracked_email(
    State(state): State<AppState>,
    payload: Result<Json<TrackedEmailRequest>, JsonRejection>,
) -> Result<Json<SentEmail>, AppError> {
    let Json(request) = payload?;

    let sent =
        send_tracked_email(state.mailer.as_ref(), &state.config.email_from, request).await?;
    Ok(Json(sent))
}
