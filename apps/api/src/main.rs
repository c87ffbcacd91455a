mod ai;
mod config;
mod editor;
mod email;
mod errors;
mod llm_client;
mod models;
mod pdf;
mod preview;
mod routes;
mod session;
mod settings;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::ai::ats::KeywordAtsScorer;
use crate::config::Config;
use crate::email::client::ResendMailer;
use crate::llm_client::{build_http_client, GeminiClient, OpenAiClient};
use crate::routes::build_app;
use crate::session::{install_session_logger, AuthProvider, InMemoryAuth};
use crate::settings::KeyStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Provider keys saved through the settings API
    let keys = KeyStore::open(&config.key_store_path)?;
    spawn_key_change_logger(&keys);

    // Upstream clients share one HTTP client
    let http = build_http_client(config.http_timeout_secs)?;
    let openai = Arc::new(OpenAiClient::new(
        http.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.openai_api_key.clone(),
        keys.clone(),
    ));
    let gemini = Arc::new(GeminiClient::new(
        http.clone(),
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
        keys.clone(),
    ));
    info!(
        "LLM clients initialized (openai: {}, gemini: {})",
        config.openai_model, config.gemini_model
    );

    let mailer = Arc::new(ResendMailer::new(
        http,
        config.email_api_url.clone(),
        config.email_api_key.clone(),
    ));

    let auth = Arc::new(InMemoryAuth::new(config.auth_users.clone()));
    install_session_logger(auth.as_ref());
    if config.auth_users.is_empty() {
        warn!("AUTH_USERS is empty; sign-in will reject every user");
    }

    let state = AppState {
        config: config.clone(),
        openai,
        gemini,
        mailer,
        ats_scorer: Arc::new(KeywordAtsScorer),
        keys,
        auth: auth as Arc<dyn AuthProvider>,
    };

    let app = build_app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Logs every provider-key change for the lifetime of the process.
fn spawn_key_change_logger(keys: &KeyStore) {
    let mut changes = keys.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => info!(
                    "Provider key change: {} {:?}",
                    change.provider.display_name(),
                    change.kind
                ),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Key change logger skipped {skipped} event(s)")
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
