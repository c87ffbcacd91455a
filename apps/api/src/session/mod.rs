//! Auth/session capability.
//!
//! Authentication is an external collaborator: handlers only see the
//! `AuthProvider` trait. The built-in `InMemoryAuth` checks credentials from
//! configuration and is what local runs and tests use.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub mod handlers;
pub mod memory;

pub use memory::InMemoryAuth;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

pub type SubscriptionId = u64;

/// Called with the signed-in user, or `None` after sign-out.
pub type AuthListener = Arc<dyn Fn(Option<&User>) + Send + Sync>;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn on_change(&self, listener: AuthListener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    async fn sign_in(&self, credentials: Credentials) -> Result<User, AuthError>;

    async fn sign_out(&self);
}

/// Registers a listener that logs every auth-state change.
pub fn install_session_logger(auth: &dyn AuthProvider) -> SubscriptionId {
    auth.on_change(Arc::new(|user: Option<&User>| match user {
        Some(user) => info!("Auth state changed: signed in as {}", user.email),
        None => info!("Auth state changed: signed out"),
    }))
}
