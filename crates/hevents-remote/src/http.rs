//! Shared HTTP plumbing: client construction and status mapping.

use std::time::Duration;

use async_trait::async_trait;
use hevents_core::{ClientError, ClientResult};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

pub const USER_AGENT: &str = concat!("hevents/", env!("CARGO_PKG_VERSION"));

/// Bearer token for authenticated requests (admin writes, signups)
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

/// Build the reqwest client used by every adapter
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "[http] Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Map a non-success status to the client error taxonomy
pub fn status_error(status: StatusCode, body: &str) -> ClientError {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body.trim())
    };

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(detail),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(detail)
        }
        StatusCode::CONFLICT => ClientError::Conflict(detail),
        _ => ClientError::Transport(detail),
    }
}

/// Connection, timeout and decoding failures
pub fn transport_error(context: &str, err: reqwest::Error) -> ClientError {
    ClientError::transport(format!("{}: {}", context, err))
}

/// Pass successful responses through, map the rest
pub async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

/// Check the status and decode a JSON body
pub async fn json<T: DeserializeOwned>(response: Response, context: &str) -> ClientResult<T> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| transport_error(context, e))
}
