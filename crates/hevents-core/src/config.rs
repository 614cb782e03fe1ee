//! Client configuration
//!
//! Loaded from environment variables, with `.env` support for development.

use std::time::Duration;

use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Environment variable names (centralized constants).
pub mod keys {
    /// Base URL of the events/signups API
    pub const API_URL: &str = "HEVENTS_API_URL";
    /// Base URL of the identity provider (defaults to the API URL)
    pub const AUTH_URL: &str = "HEVENTS_AUTH_URL";
    /// Public API key sent to the identity provider
    pub const AUTH_KEY: &str = "HEVENTS_AUTH_KEY";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "HEVENTS_HTTP_TIMEOUT_SECS";
    /// Where password-reset emails should send the user back to
    pub const RESET_REDIRECT: &str = "HEVENTS_RESET_REDIRECT";
}

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub auth_url: String,
    pub auth_api_key: String,
    pub request_timeout: Duration,
    pub password_reset_redirect: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_API_URL.to_string(),
            auth_api_key: String::new(),
            request_timeout: DEFAULT_HTTP_TIMEOUT,
            password_reset_redirect: None,
        }
    }
}

impl ClientConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn load() -> ClientResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "[Config] Loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = match non_empty(keys::API_URL) {
            Some(raw) => normalize_url(keys::API_URL, &raw)?,
            None => DEFAULT_API_URL.to_string(),
        };
        let auth_url = match non_empty(keys::AUTH_URL) {
            Some(raw) => normalize_url(keys::AUTH_URL, &raw)?,
            None => api_url.clone(),
        };

        let request_timeout = match non_empty(keys::HTTP_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    ClientError::validation(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        keys::HTTP_TIMEOUT_SECS,
                        raw
                    ))
                })?,
            None => DEFAULT_HTTP_TIMEOUT,
        };

        Ok(Self {
            api_url,
            auth_url,
            auth_api_key: lookup(keys::AUTH_KEY).unwrap_or_default(),
            request_timeout,
            password_reset_redirect: non_empty(keys::RESET_REDIRECT),
        })
    }
}

/// Require an absolute http(s) URL and drop trailing slashes
fn normalize_url(key: &str, raw: &str) -> ClientResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ClientError::validation(format!("{} is not a valid URL: {}", key, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::validation(format!(
            "{} must use http or https, got '{}'",
            key,
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_string())
}
