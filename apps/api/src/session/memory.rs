use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthError, AuthListener, AuthProvider, Credentials, SubscriptionId, User};

/// Credential check against a fixed `email:password` list; one session at a time.
pub struct InMemoryAuth {
    users: Vec<(String, String)>,
    current: Mutex<Option<User>>,
    listeners: Mutex<Vec<(SubscriptionId, AuthListener)>>,
    next_id: AtomicU64,
}

impl InMemoryAuth {
    pub fn new(users: Vec<(String, String)>) -> Self {
        Self {
            users,
            current: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn set_current(&self, user: Option<User>) {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = user.clone();

        // snapshot so listeners may (un)subscribe while being called
        let listeners: Vec<AuthListener> = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(user.as_ref());
        }
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuth {
    fn current_user(&self) -> Option<User> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn on_change(&self, listener: AuthListener) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<User, AuthError> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let known = self.users.iter().any(|(user_email, password)| {
            user_email.eq_ignore_ascii_case(email) && *password == credentials.password
        });
        if !known {
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, email.to_ascii_lowercase().as_bytes())
                .to_string(),
            email: email.to_string(),
        };
        self.set_current(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) {
        if self.current_user().is_some() {
            self.set_current(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn auth() -> InMemoryAuth {
        InMemoryAuth::new(vec![("ada@example.com".into(), "engine".into())])
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let auth = auth();
        assert_eq!(auth.current_user(), None);

        let user = auth.sign_in(creds("Ada@Example.com", "engine")).await.unwrap();
        assert_eq!(auth.current_user(), Some(user.clone()));

        // id is stable per e-mail
        auth.sign_out().await;
        let again = auth.sign_in(creds("ada@example.com", "engine")).await.unwrap();
        assert_eq!(again.id, user.id);

        auth.sign_out().await;
        assert_eq!(auth.current_user(), None);
    }

    #[tokio::test]
    async fn test_rejects_bad_credentials() {
        let auth = auth();
        assert_eq!(
            auth.sign_in(creds("ada@example.com", "wrong")).await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth.sign_in(creds(" ", "")).await,
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(auth.current_user(), None);
    }

    #[tokio::test]
    async fn test_listeners_see_every_change() {
        let auth = auth();
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let sink = seen.clone();
        let id = auth.on_change(Arc::new(move |user: Option<&User>| {
            sink.lock().unwrap().push(user.map(|u| u.email.clone()));
        }));

        auth.sign_in(creds("ada@example.com", "engine")).await.unwrap();
        auth.sign_out().await;
        // already signed out
        auth.sign_out().await;

        assert!(auth.unsubscribe(id));
        assert!(!auth.unsubscribe(id));
        auth.sign_in(creds("ada@example.com", "engine")).await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("ada@example.com".to_string()), None]
        );
    }
}
