use std::sync::Arc;

use crate::ai::ats::AtsScorer;
use crate::config::Config;
use crate::email::client::Mailer;
use crate::llm_client::CompletionProvider;
use crate::session::AuthProvider;
use crate::settings::KeyStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Backs `/api/optimize-resume` and `/api/parse-job-description`.
    pub openai: Arc<dyn CompletionProvider>,
    /// Backs `/api/gemini-optimize`.
    pub gemini: Arc<dyn CompletionProvider>,
    pub mailer: Arc<dyn Mailer>,
    /// Pluggable ATS scorer. Default: KeywordAtsScorer.
    pub ats_scorer: Arc<dyn AtsScorer>,
    pub keys: KeyStore,
    pub auth: Arc<dyn AuthProvider>,
}
