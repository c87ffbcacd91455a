pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ai::handlers as ai;
use crate::editor::handlers as editor;
use crate::email::handlers as email;
use crate::preview::handlers as preview;
use crate::session::handlers as session;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI
        .route("/api/optimize-resume", post(ai::handle_optimize_resume))
        .route("/api/gemini-optimize", post(ai::handle_gemini_optimize))
        .route(
            "/api/parse-job-description",
            post(ai::handle_parse_job_description),
        )
        .route("/api/ats-score", post(ai::handle_ats_score))
        // E-mail
        .route(
            "/api/send-tracked-email",
            post(email::handle_send_tracked_email),
        )
        // Editing and preview
        .route("/api/resume/edit", post(editor::handle_edit))
        .route("/api/resume/presets", post(editor::handle_presets))
        .route("/api/preview", post(preview::handle_preview))
        .route("/api/templates", get(preview::handle_list_templates))
        // Settings and session
        .route("/api/settings/keys", get(settings::handle_list_keys))
        .route(
            "/api/settings/keys/:provider",
            put(settings::handle_set_key).delete(settings::handle_remove_key),
        )
        .route(
            "/api/session",
            get(session::handle_current_session)
                .post(session::handle_sign_in)
                .delete(session::handle_sign_out),
        )
        .with_state(state)
}

/// Router plus the HTTP layers: request tracing and permissive CORS (any
/// origin, method and header; preflight answered).
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
