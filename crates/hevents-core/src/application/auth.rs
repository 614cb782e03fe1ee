//! Auth Application Service
//!
//! Sign-in with role-based landing, sign-out, and password recovery.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainEvent, Identity, Role};
use crate::error::{ClientError, ClientResult};
use crate::event_bus::EventSender;
use crate::service::RoleResolver;
use crate::session::IdentityProvider;

use super::route_guard::Route;

/// Result of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub role: Role,
    /// Staff land on the dashboard, everyone else on their calendar
    pub landing: Route,
}

pub struct AuthAppService {
    provider: Arc<dyn IdentityProvider>,
    resolver: Arc<RoleResolver>,
    event_sender: EventSender,
    reset_redirect: Option<String>,
}

impl AuthAppService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        resolver: Arc<RoleResolver>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            provider,
            resolver,
            event_sender,
            reset_redirect: None,
        }
    }

    /// Where password-reset emails should link back to
    pub fn with_reset_redirect(mut self, redirect: Option<String>) -> Self {
        self.reset_redirect = redirect;
        self
    }

    /// Sign in with email and password
    ///
    /// Emits: `SignedIn`
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::validation("email and password are required"));
        }

        let identity = self.provider.sign_in_with_password(email, password).await?;
        let role = self.resolver.effective_role(&identity).await;
        let landing = if role.is_staff() {
            Route::Admin
        } else {
            Route::Calendar
        };

        info!(email = %identity.email, role = %role, landing = %landing, "[AuthAppService] Signed in");
        self.event_sender.emit(DomainEvent::SignedIn {
            email: identity.email.clone(),
            role,
        });

        Ok(LoginOutcome {
            identity,
            role,
            landing,
        })
    }

    /// Sign out the current session
    ///
    /// Emits: `SignedOut`
    pub async fn sign_out(&self) -> ClientResult<()> {
        let email = match self.provider.current_user().await {
            Ok(identity) => identity.map(|i| i.email),
            Err(e) => {
                warn!(error = %e, "[AuthAppService] Could not resolve user before sign-out");
                None
            }
        };

        self.provider.sign_out().await?;

        info!(email = ?email, "[AuthAppService] Signed out");
        self.event_sender.emit(DomainEvent::SignedOut { email });
        Ok(())
    }

    pub async fn request_password_reset(&self, email: &str) -> ClientResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ClientError::validation("an email is required"));
        }
        self.provider
            .request_password_reset(email, self.reset_redirect.as_deref())
            .await?;
        info!(email = %email, "[AuthAppService] Password reset requested");
        Ok(())
    }

    pub async fn update_password(&self, new_password: &str) -> ClientResult<()> {
        if new_password.is_empty() {
            return Err(ClientError::validation("a new password is required"));
        }
        self.provider.update_password(new_password).await?;
        info!("[AuthAppService] Password updated");
        Ok(())
    }
}
