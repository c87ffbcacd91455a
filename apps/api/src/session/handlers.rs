use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::session::{Credentials, User};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

/// GET /api/session
pub async fn handle_current_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: state.auth.current_user(),
    })
}

/// POST /api/session
pub async fn handle_sign_in(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Json(credentials) = payload?;
    let user = state.auth.sign_in(credentials).await?;
    Ok(Json(SessionResponse { user: Some(user) }))
}

/// DELETE /api/session
pub async fn handle_sign_out(State(state): State<AppState>) -> Json<SessionResponse> {
    state.auth.sign_out().await;
    Json(SessionResponse { user: None })
}
