//! Key management endpoints. Keys are never echoed back, only masked.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::settings::keys::mask_key;
use crate::settings::Provider;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetKeyRequest {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatus {
    pub provider: Provider,
    pub storage_key: &'static str,
    pub configured: bool,
    /// `stored` when saved through this API, `environment` for the env fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked: Option<String>,
}

fn status_of(state: &AppState, provider: Provider) -> KeyStatus {
    let env_key = match provider {
        Provider::OpenAi => state.config.openai_api_key.as_deref(),
        Provider::Gemini => state.config.gemini_api_key.as_deref(),
    };
    let (source, key) = match state.keys.get(provider) {
        Some(stored) => (Some("stored"), Some(stored)),
        None => match env_key {
            Some(env) => (Some("environment"), Some(env.to_string())),
            None => (None, None),
        },
    };

    KeyStatus {
        provider,
        storage_key: provider.storage_key(),
        configured: key.is_some(),
        source,
        masked: key.as_deref().map(mask_key),
    }
}

/// GET /api/settings/keys
pub async fn handle_list_keys(State(state): State<AppState>) -> Json<Vec<KeyStatus>> {
    Json(
        Provider::ALL
            .iter()
            .map(|p| status_of(&state, *p))
            .collect(),
    )
}

/// PUT /api/settings/keys/:provider
pub async fn handle_set_key(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    payload: Result<Json<SetKeyRequest>, JsonRejection>,
) -> Result<Json<KeyStatus>, AppError> {
    let provider: Provider = provider.parse()?;
    let Json(request) = payload?;

    state.keys.set(provider, &request.api_key)?;
    Ok(Json(status_of(&state, provider)))
}

/// DELETE /api/settings/keys/:provider
pub async fn handle_remove_key(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<KeyStatus>, AppError> {
    let provider: Provider = provider.parse()?;
    state.keys.remove(provider)?;
    Ok(Json(status_of(&state, provider)))
}
