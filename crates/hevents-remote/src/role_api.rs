//! Role store adapter (PostgREST-style `users` table).
//!
//! The table sits behind row-level security, so lookups carry the signed-in
//! user's access token when one is available.

use std::sync::Arc;

use async_trait::async_trait;
use hevents_core::{ClientConfig, RepoResult, Role, RoleRepository};
use serde::Deserialize;
use tracing::debug;

use crate::http::{self, AccessTokenSource};

#[derive(Debug, Deserialize)]
struct RoleRow {
    #[serde(default)]
    role: Option<String>,
}

pub struct RoleApiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    tokens: Option<Arc<dyn AccessTokenSource>>,
}

impl RoleApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
            tokens: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.auth_url.clone(),
            config.auth_api_key.clone(),
            http::build_client(config.request_timeout),
        )
    }

    /// Send the session's bearer token with each lookup
    pub fn with_token_source(mut self, tokens: Arc<dyn AccessTokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }
}

#[async_trait]
impl RoleRepository for RoleApiClient {
    async fn find_role(&self, email: &str) -> RepoResult<Option<Role>> {
        let filter = format!("eq.{}", email);
        let mut request = self
            .client
            .get(http::join_url(&self.base_url, "/rest/v1/users"))
            .header("apikey", &self.api_key)
            .query(&[("select", "role"), ("email", filter.as_str())]);
        let token = match &self.tokens {
            Some(tokens) => tokens.access_token().await,
            None => None,
        };
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| http::transport_error("failed to fetch role", e))?;

        let rows: Vec<RoleRow> = http::json(response, "failed to parse role rows").await?;
        let role = rows
            .into_iter()
            .next()
            .map(|row| Role::from_stored(row.role.as_deref().unwrap_or_default()));

        debug!(email = %email, role = ?role, "[RoleApiClient] Role lookup");
        Ok(role)
    }
}
