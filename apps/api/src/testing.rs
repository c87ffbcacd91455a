//! Test doubles for the upstream seams (LLM providers and the e-mail API).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ai::ats::KeywordAtsScorer;
use crate::config::Config;
use crate::email::client::{Mailer, OutgoingEmail};
use crate::email::EmailError;
use crate::llm_client::{CompletionProvider, LlmError};
use crate::session::InMemoryAuth;
use crate::settings::KeyStore;
use crate::state::AppState;

enum Reply {
    Text(String),
    Status(u16, String),
}

/// Answers every completion with a fixed reply and counts calls.
pub struct StubProvider {
    reply: Reply,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubProvider {
    pub fn text(text: &str) -> Self {
        Self::with(Reply::Text(text.to_string()))
    }

    pub fn status(status: u16, message: &str) -> Self {
        Self::with(Reply::Status(status, message.to_string()))
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status, message) => Err(LlmError::Api {
                provider: "stub",
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// Records outgoing e-mails; fails when constructed with `failing`.
#[derive(Default)]
pub struct StubMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl StubMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl Mailer for StubMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<String, EmailError> {
        if self.fail {
            return Err(EmailError::Api {
                status: 422,
                message: "Unprocessable Entity".into(),
            });
        }
        self.sent.lock().unwrap().push(email);
        Ok("email_123".to_string())
    }
}

pub struct TestBackends {
    pub openai: Arc<StubProvider>,
    pub gemini: Arc<StubProvider>,
    pub mailer: Arc<StubMailer>,
}

impl Default for TestBackends {
    fn default() -> Self {
        Self {
            openai: Arc::new(StubProvider::text("{}")),
            gemini: Arc::new(StubProvider::text("{}")),
            mailer: Arc::new(StubMailer::default()),
        }
    }
}

impl TestBackends {
    pub fn state(&self) -> AppState {
        let config = Config::for_tests();
        AppState {
            auth: Arc::new(InMemoryAuth::new(config.auth_users.clone())),
            config,
            openai: self.openai.clone(),
            gemini: self.gemini.clone(),
            mailer: self.mailer.clone(),
            ats_scorer: Arc::new(KeywordAtsScorer),
            keys: KeyStore::in_memory(),
        }
    }
}
