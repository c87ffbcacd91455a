use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::editor::command::{EditCommand, EditOutcome};
use crate::editor::presets::{remaining, PRESET_INTERESTS, PRESET_SKILLS};
use crate::editor::ResumeEditor;
use crate::errors::AppError;
use crate::models::resume::ResumeData;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub resume_data: ResumeData,
    pub command: EditCommand,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub resume_data: ResumeData,
    #[serde(flatten)]
    pub outcome: EditOutcome,
}

/// POST /api/resume/edit
///
/// Applies one add / update / remove to the posted resume and returns the
/// result together with the notice to show.
pub async fn handle_edit(
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> Result<Json<EditResponse>, AppError> {
    let Json(request) = payload?;
    let section = request.command.section();

    let mut editor = ResumeEditor::new(request.resume_data);
    let outcome = request.command.apply(&mut editor)?;
    if outcome.notice.is_change() {
        info!("Edit on {:?}: {:?}", section, outcome.notice);
    } else {
        debug!("Edit on {:?} left resume unchanged: {:?}", section, outcome.notice);
    }

    Ok(Json(EditResponse {
        resume_data: editor.into_data(),
        outcome,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetsRequest {
    #[serde(default)]
    pub resume_data: ResumeData,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub interests: Vec<&'static str>,
    pub skills: Vec<&'static str>,
}

/// POST /api/resume/presets
///
/// Preset interests and skills not yet on the posted resume.
pub async fn handle_presets(
    payload: Result<Json<PresetsRequest>, JsonRejection>,
) -> Result<Json<PresetsResponse>, AppError> {
    let Json(request) = payload?;
    let data = request.resume_data;

    Ok(Json(PresetsResponse {
        interests: remaining(PRESET_INTERESTS, &data.interests),
        skills: remaining(PRESET_SKILLS, &data.skills.names()),
    }))
}
