//! Identity provider adapter for a GoTrue-style auth service.
//!
//! The session (access token + user) lives in memory only. Every transition
//! is published on the provider's `SessionChannel`.

use async_trait::async_trait;
use hevents_core::{
    ClientConfig, ClientError, ClientResult, Identity, IdentityProvider, SessionChange,
    SessionChangeKind, SessionChannel,
};
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::http::{self, AccessTokenSource};

/// Header carrying the project's public API key
const API_KEY_HEADER: &str = "apikey";

#[derive(Debug, Deserialize)]
struct AuthUser {
    #[serde(default)]
    id: Option<String>,
    email: String,
}

impl From<AuthUser> for Identity {
    fn from(user: AuthUser) -> Self {
        let identity = Identity::new(user.email);
        match user.id {
            Some(id) => identity.with_id(id),
            None => identity,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordUpdate<'a> {
    password: &'a str,
}

#[derive(Debug, Clone)]
struct AuthSession {
    access_token: String,
    identity: Identity,
}

/// HTTP identity provider
pub struct AuthApiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    session: RwLock<Option<AuthSession>>,
    changes: SessionChannel,
}

impl AuthApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
            session: RwLock::new(None),
            changes: SessionChannel::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.auth_url.clone(),
            config.auth_api_key.clone(),
            http::build_client(config.request_timeout),
        )
    }

    /// Number of live session-change subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.changes.subscriber_count()
    }

    /// Identity of the locally held session, without a remote call
    pub async fn session_identity(&self) -> Option<Identity> {
        self.session.read().await.as_ref().map(|s| s.identity.clone())
    }

    fn url(&self, path: &str) -> String {
        http::join_url(&self.base_url, path)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }

    async fn access_token_value(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Drop the local session and announce it, if there was one
    async fn clear_session(&self) {
        let previous = self.session.write().await.take();
        if previous.is_some() {
            self.changes.publish(SessionChange::signed_out());
        }
    }
}

#[async_trait]
impl IdentityProvider for AuthApiClient {
    async fn current_user(&self) -> ClientResult<Option<Identity>> {
        let Some(token) = self.access_token_value().await else {
            return Ok(None);
        };

        let response = self
            .with_key(self.client.get(self.url("/auth/v1/user")))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| http::transport_error("failed to fetch current user", e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            info!("[AuthApiClient] Session rejected, signing out locally");
            self.clear_session().await;
            return Ok(None);
        }

        let user: AuthUser = http::json(response, "failed to parse user").await?;
        let identity = Identity::from(user);
        if let Some(session) = self.session.write().await.as_mut() {
            session.identity = identity.clone();
        }
        Ok(Some(identity))
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.changes.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> ClientResult<Identity> {
        let response = self
            .with_key(self.client.post(self.url("/auth/v1/token")))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(|e| http::transport_error("failed to sign in", e))?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            let body = response.text().await.unwrap_or_default();
            warn!(email = %email, status = %status, "[AuthApiClient] Credentials rejected");
            return Err(ClientError::Unauthorized(format!(
                "invalid login credentials ({})",
                body.trim()
            )));
        }

        let token: TokenResponse = http::json(response, "failed to parse token response").await?;
        let identity = Identity::from(token.user);

        *self.session.write().await = Some(AuthSession {
            access_token: token.access_token,
            identity: identity.clone(),
        });

        info!(email = %identity.email, "[AuthApiClient] Signed in");
        self.changes.publish(SessionChange::signed_in(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> ClientResult<()> {
        if let Some(token) = self.access_token_value().await {
            let result = self
                .with_key(self.client.post(self.url("/auth/v1/logout")))
                .bearer_auth(token)
                .send()
                .await;
            match result {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "[AuthApiClient] Remote sign-out rejected");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "[AuthApiClient] Remote sign-out failed"),
            }
        }

        self.clear_session().await;
        debug!("[AuthApiClient] Local session cleared");
        Ok(())
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> ClientResult<()> {
        let mut request = self
            .with_key(self.client.post(self.url("/auth/v1/recover")))
            .json(&RecoverRequest { email });
        if let Some(redirect) = redirect_to {
            request = request.query(&[("redirect_to", redirect)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| http::transport_error("failed to request password reset", e))?;
        http::check(response).await?;

        info!(email = %email, "[AuthApiClient] Password reset email requested");
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> ClientResult<()> {
        let token = self.access_token_value().await.ok_or_else(|| {
            ClientError::Unauthorized("sign in before changing the password".to_string())
        })?;

        let response = self
            .with_key(self.client.put(self.url("/auth/v1/user")))
            .bearer_auth(token)
            .json(&PasswordUpdate {
                password: new_password,
            })
            .send()
            .await
            .map_err(|e| http::transport_error("failed to update password", e))?;
        let user: AuthUser = http::json(response, "failed to parse user").await?;

        let identity = Identity::from(user);
        info!(email = %identity.email, "[AuthApiClient] Password updated");
        self.changes.publish(SessionChange {
            kind: SessionChangeKind::UserUpdated,
            identity: Some(identity),
        });
        Ok(())
    }
}

#[async_trait]
impl AccessTokenSource for AuthApiClient {
    async fn access_token(&self) -> Option<String> {
        self.access_token_value().await
    }
}
