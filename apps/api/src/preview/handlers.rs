use axum::{
    extract::rejection::JsonRejection,
    response::Html,
    Json,
};

use crate::ai::handlers::RESUME_DATA_REQUIRED;
use crate::errors::AppError;
use crate::preview::compose::{compose_preview, PreviewRequest, TemplateInfo, TEMPLATES};
use crate::preview::render::render_html;

/// POST /api/preview
///
/// Renders the resume against the selected template and colours.
pub async fn handle_preview(
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Html<String>, AppError> {
    let Json(request) = payload?;
    let resume = request
        .resume_data
        .ok_or_else(|| AppError::MissingField(RESUME_DATA_REQUIRED.to_string()))?;

    let preview = compose_preview(&resume, request.template_index, &request.colors);
    Ok(Html(render_html(&preview)))
}

/// GET /api/templates
pub async fn handle_list_templates() -> Json<&'static [TemplateInfo]> {
    Json(TEMPLATES)
}
