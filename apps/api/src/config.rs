use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback provider keys. A key saved through the key store wins over these.
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_base_url: String,
    pub gemini_base_url: String,
    pub openai_model: String,
    pub gemini_model: String,
    pub email_api_key: String,
    pub email_api_url: String,
    /// Verified sender address; the display name comes from each request.
    pub email_from: String,
    pub key_store_path: PathBuf,
    /// `email:password` pairs accepted by the built-in session provider.
    pub auth_users: Vec<(String, String)>,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            gemini_model: env_or("GEMINI_MODEL", "gemini-1.5-flash"),
            email_api_key: require_env("EMAIL_API_KEY")?,
            email_api_url: env_or("EMAIL_API_URL", DEFAULT_EMAIL_API_URL),
            email_from: require_env("EMAIL_FROM")?,
            key_store_path: PathBuf::from(env_or("KEY_STORE_PATH", ".api_keys.json")),
            auth_users: parse_auth_users(&env_or("AUTH_USERS", "")),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parses `a@x.com:secret;b@y.com:other`. Malformed pairs are skipped.
fn parse_auth_users(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|pair| {
            let (email, password) = pair.trim().split_once(':')?;
            let email = email.trim();
            (!email.is_empty() && !password.is_empty())
                .then(|| (email.to_string(), password.to_string()))
        })
        .collect()
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: Some("sk-test".into()),
            gemini_api_key: Some("gm-test".into()),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.into(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.into(),
            openai_model: "gpt-4o-mini".into(),
            gemini_model: "gemini-1.5-flash".into(),
            email_api_key: "re-test".into(),
            email_api_url: DEFAULT_EMAIL_API_URL.into(),
            email_from: "resumes@example.com".into(),
            key_store_path: PathBuf::from(".api_keys.json"),
            auth_users: vec![("ada@example.com".into(), "engine".into())],
            http_timeout_secs: 5,
            port: 0,
            rust_log: "debug".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_users() {
        let users = parse_auth_users("ada@example.com:engine; grace@example.com:cobol");
        assert_eq!(
            users,
            vec![
                ("ada@example.com".to_string(), "engine".to_string()),
                ("grace@example.com".to_string(), "cobol".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_auth_users_skips_malformed_pairs() {
        assert!(parse_auth_users("").is_empty());
        assert_eq!(parse_auth_users("nopassword;:x;a@b.c:pw").len(), 1);
    }
}
