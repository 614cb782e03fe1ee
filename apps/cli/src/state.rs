//! Application state shared by CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use hevents_core::{
    ApplicationServices, ApplicationServicesBuilder, ClientConfig, EventBus, LoginOutcome,
};
use hevents_remote::{AuthApiClient, EventsApiClient, RoleApiClient};
use tracing::info;

/// Credentials from flags or the environment
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct AppState {
    pub services: ApplicationServices,
    credentials: Credentials,
}

impl AppState {
    /// Wire the HTTP adapters into the application services
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        let auth = Arc::new(AuthApiClient::from_config(&config));
        let data = Arc::new(EventsApiClient::from_config(&config).with_token_source(auth.clone()));
        let roles = Arc::new(RoleApiClient::from_config(&config).with_token_source(auth.clone()));
        info!(api_url = %data.base_url(), "[AppState] Remote endpoints");

        let services = ApplicationServicesBuilder::new()
            .with_event_bus(Arc::new(EventBus::new()))
            .with_event_repo(data.clone())
            .with_signup_repo(data)
            .with_role_repo(roles)
            .with_identity_provider(auth)
            .with_reset_redirect(config.password_reset_redirect.clone())
            .build()
            .context("Failed to build application services")?;

        info!("[AppState] Initialized");
        Ok(Self {
            services,
            credentials,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.email.is_some() && self.credentials.password.is_some()
    }

    /// Sign in with the configured credentials
    pub async fn sign_in(&self) -> Result<LoginOutcome> {
        let email = self
            .credentials
            .email
            .as_deref()
            .context("An email is required: pass --email or set HEVENTS_EMAIL")?;
        let password = self
            .credentials
            .password
            .as_deref()
            .context("A password is required: pass --password or set HEVENTS_PASSWORD")?;

        self.services
            .auth()
            .sign_in(email, password)
            .await
            .context("Sign-in failed")
    }

    /// Sign in only when credentials were given
    pub async fn sign_in_if_possible(&self) -> Result<Option<LoginOutcome>> {
        if self.has_credentials() {
            self.sign_in().await.map(Some)
        } else {
            Ok(None)
        }
    }
}
