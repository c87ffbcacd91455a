//! Observable store for user-supplied provider API keys.
//!
//! Keys live under two fixed storage names and are persisted as a small JSON
//! file. Every change is broadcast so other components (the LLM clients, the
//! session log) can react without polling.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

const CHANGE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::OpenAi, Provider::Gemini];

    /// Fixed storage name of the key.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai_api_key",
            Provider::Gemini => "gemini_api_key",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }
}

impl FromStr for Provider {
    type Err = KeyStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "openai_api_key" => Ok(Provider::OpenAi),
            "gemini" | "gemini_api_key" => Ok(Provider::Gemini),
            other => Err(KeyStoreError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Updated,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyChange {
    pub provider: Provider,
    pub kind: ChangeKind,
}

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("API key cannot be empty")]
    EmptyKey,

    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("Key store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gemini_api_key: Option<String>,
}

impl StoredKeys {
    fn slot(&mut self, provider: Provider) -> &mut Option<String> {
        match provider {
            Provider::OpenAi => &mut self.openai_api_key,
            Provider::Gemini => &mut self.gemini_api_key,
        }
    }

    fn get(&self, provider: Provider) -> Option<&String> {
        match provider {
            Provider::OpenAi => self.openai_api_key.as_ref(),
            Provider::Gemini => self.gemini_api_key.as_ref(),
        }
    }
}

struct Inner {
    path: Option<PathBuf>,
    keys: RwLock<StoredKeys>,
    changes: broadcast::Sender<KeyChange>,
}

/// Cheaply cloneable handle; all clones share the same keys and channel.
#[derive(Clone)]
pub struct KeyStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("path", &self.inner.path)
            .finish_non_exhaustive()
    }
}

impl KeyStore {
    /// Opens the store backed by `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KeyStoreError> {
        let path = path.as_ref().to_path_buf();
        let keys = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredKeys::default(),
            Err(e) => return Err(e.into()),
        };
        info!("Key store opened at {}", path.display());
        Ok(Self::with_keys(Some(path), keys))
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::with_keys(None, StoredKeys::default())
    }

    fn with_keys(path: Option<PathBuf>, keys: StoredKeys) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                path,
                keys: RwLock::new(keys),
                changes,
            }),
        }
    }

    pub fn get(&self, provider: Provider) -> Option<String> {
        let keys = self
            .inner
            .keys
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.get(provider).cloned()
    }

    pub fn set(&self, provider: Provider, key: &str) -> Result<(), KeyStoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(KeyStoreError::EmptyKey);
        }
        self.write(provider, Some(key.to_string()))?;
        self.notify(provider, ChangeKind::Updated);
        Ok(())
    }

    /// Returns whether a key was stored.
    pub fn remove(&self, provider: Provider) -> Result<bool, KeyStoreError> {
        if self.get(provider).is_none() {
            return Ok(false);
        }
        self.write(provider, None)?;
        self.notify(provider, ChangeKind::Removed);
        Ok(true)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KeyChange> {
        self.inner.changes.subscribe()
    }

    /// Persists the changed keys first; the live keys only change once the
    /// file write succeeded.
    fn write(&self, provider: Provider, value: Option<String>) -> Result<(), KeyStoreError> {
        let mut keys = self
            .inner
            .keys
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = keys.clone();
        *next.slot(provider) = value;

        if let Some(path) = &self.inner.path {
            std::fs::write(path, serde_json::to_vec_pretty(&next)?)?;
            debug!("Persisted key store to {}", path.display());
        }
        *keys = next;
        Ok(())
    }

    fn notify(&self, provider: Provider, kind: ChangeKind) {
        debug!("{} API key {:?}", provider.display_name(), kind);
        // No subscribers is fine.
        let _ = self.inner.changes.send(KeyChange { provider, kind });
    }
}

/// Shows only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = KeyStore::in_memory();
        assert_eq!(store.get(Provider::OpenAi), None);

        store.set(Provider::OpenAi, "  sk-123  ").unwrap();
        assert_eq!(store.get(Provider::OpenAi).as_deref(), Some("sk-123"));
        assert_eq!(store.get(Provider::Gemini), None);

        assert!(store.remove(Provider::OpenAi).unwrap());
        assert!(!store.remove(Provider::OpenAi).unwrap());
        assert_eq!(store.get(Provider::OpenAi), None);
    }

    #[test]
    fn test_blank_key_rejected() {
        let store = KeyStore::in_memory();
        assert!(matches!(
            store.set(Provider::Gemini, "   "),
            Err(KeyStoreError::EmptyKey)
        ));
    }

    #[tokio::test]
    async fn test_changes_are_broadcast() {
        let store = KeyStore::in_memory();
        let mut rx = store.subscribe();

        store.set(Provider::Gemini, "gm-1").unwrap();
        store.remove(Provider::Gemini).unwrap();
        // nothing stored, so no event
        store.remove(Provider::Gemini).unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            KeyChange {
                provider: Provider::Gemini,
                kind: ChangeKind::Updated
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            KeyChange {
                provider: Provider::Gemini,
                kind: ChangeKind::Removed
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_persists_under_fixed_storage_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");

        let store = KeyStore::open(&path).unwrap();
        store.set(Provider::OpenAi, "sk-abc").unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["openai_api_key"], "sk-abc");
        assert!(raw.get("gemini_api_key").is_none());

        let reopened = KeyStore::open(&path).unwrap();
        assert_eq!(reopened.get(Provider::OpenAi).as_deref(), Some("sk-abc"));
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_keys_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyStore::open(dir.path().join("no_such_dir").join("keys.json")).unwrap();
        let mut rx = store.subscribe();

        assert!(matches!(
            store.set(Provider::OpenAi, "sk-new"),
            Err(KeyStoreError::Io(_))
        ));
        assert_eq!(store.get(Provider::OpenAi), None);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_stored_key() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();

        let store = KeyStore::open(data_dir.join("keys.json")).unwrap();
        store.set(Provider::Gemini, "gm-1").unwrap();
        let mut rx = store.subscribe();

        std::fs::remove_dir_all(&data_dir).unwrap();
        assert!(store.remove(Provider::Gemini).is_err());
        assert_eq!(store.get(Provider::Gemini).as_deref(), Some("gm-1"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            KeyStore::open(&path),
            Err(KeyStoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!(
            "gemini_api_key".parse::<Provider>().unwrap(),
            Provider::Gemini
        );
        assert!("claude".parse::<Provider>().is_err());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdef1234"), "****1234");
        assert_eq!(mask_key("abc"), "***");
    }
}
