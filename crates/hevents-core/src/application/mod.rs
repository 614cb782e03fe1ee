//! Application Services - Orchestration layer with event emission
//!
//! Application services sit between the presentation layer (CLI commands,
//! views) and the domain layer (repositories, domain services). They:
//!
//! 1. **Orchestrate** operations across repositories and the identity provider
//! 2. **Emit events** after successful operations via the event bus
//! 3. **Gate** protected views on identity and role
//!
//! # Architecture
//!
//! ```text
//! Presentation Layer (CLI)
//!         │
//!         ▼
//! ┌─────────────────────────────────────┐
//! │      Application Services           │
//! │  ┌─────────────────────────────┐    │
//! │  │ AuthAppService              │    │
//! │  │ SignupCoordinator           │    │
//! │  │ AdminEventEditor            │    │
//! │  │ RouteGuard / views          │    │
//! │  └─────────────┬───────────────┘    │
//! │                ▼                    │
//! │         ┌──────────┐                │
//! │         │Event Bus │                │
//! │         └──────────┘                │
//! └─────────────────────────────────────┘
//!         │
//!         ▼
//! Domain Layer (Repositories, IdentityProvider)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let services = ApplicationServicesBuilder::new()
//!     .with_event_bus(Arc::new(EventBus::new()))
//!     .with_event_repo(events)
//!     .with_signup_repo(signups)
//!     .with_role_repo(roles)
//!     .with_identity_provider(provider)
//!     .build()?;
//!
//! let outcome = services.signups().join(&event_id, "ana@example.com").await?;
//! // -> Emits SignupCreated event
//! ```

mod admin;
mod auth;
mod event_detail;
mod route_guard;
mod signup;

pub use admin::{AdminDashboard, AdminEventEditor};
pub use auth::{AuthAppService, LoginOutcome};
pub use event_detail::{EventDetail, EventDetailView, SignupPanel};
pub use route_guard::{GuardDecision, GuardState, Route, RouteGuard, ACCESS_DENIED_NOTICE};
pub use signup::{JoinOutcome, SignupCoordinator};

use std::sync::Arc;

use crate::error::ClientResult;
use crate::event_bus::{EventBus, EventReceiver};
use crate::repository::{EventRepository, RoleRepository, SignupRepository};
use crate::service::{EventDirectory, RoleResolver};
use crate::session::{IdentityProvider, IdentitySessionTracker};

/// Builder for creating all application services with shared dependencies
pub struct ApplicationServicesBuilder {
    event_bus: Option<Arc<EventBus>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    signup_repo: Option<Arc<dyn SignupRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    reset_redirect: Option<String>,
}

impl ApplicationServicesBuilder {
    pub fn new() -> Self {
        Self {
            event_bus: None,
            event_repo: None,
            signup_repo: None,
            role_repo: None,
            identity_provider: None,
            reset_redirect: None,
        }
    }

    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn with_event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn with_signup_repo(mut self, repo: Arc<dyn SignupRepository>) -> Self {
        self.signup_repo = Some(repo);
        self
    }

    pub fn with_role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn with_identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn with_reset_redirect(mut self, redirect: Option<String>) -> Self {
        self.reset_redirect = redirect;
        self
    }

    /// Build all application services
    pub fn build(self) -> anyhow::Result<ApplicationServices> {
        let event_bus = self
            .event_bus
            .ok_or_else(|| anyhow::anyhow!("Event bus required"))?;
        let events = self
            .event_repo
            .ok_or_else(|| anyhow::anyhow!("Event repository required"))?;
        let signups = self
            .signup_repo
            .ok_or_else(|| anyhow::anyhow!("Signup repository required"))?;
        let roles = self
            .role_repo
            .ok_or_else(|| anyhow::anyhow!("Role repository required"))?;
        let provider = self
            .identity_provider
            .ok_or_else(|| anyhow::anyhow!("Identity provider required"))?;

        let sender = event_bus.sender();
        let resolver = Arc::new(RoleResolver::new(roles));

        Ok(ApplicationServices {
            directory: Arc::new(EventDirectory::new(events.clone())),
            signups: Arc::new(SignupCoordinator::new(signups, sender.clone())),
            editor: Arc::new(AdminEventEditor::new(events, sender.clone())),
            auth: AuthAppService::new(provider.clone(), resolver.clone(), sender)
                .with_reset_redirect(self.reset_redirect),
            resolver,
            provider,
            event_bus,
        })
    }
}

impl Default for ApplicationServicesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all application services
pub struct ApplicationServices {
    /// Shared event bus
    pub event_bus: Arc<EventBus>,
    provider: Arc<dyn IdentityProvider>,
    resolver: Arc<RoleResolver>,
    directory: Arc<EventDirectory>,
    signups: Arc<SignupCoordinator>,
    editor: Arc<AdminEventEditor>,
    auth: AuthAppService,
}

impl ApplicationServices {
    pub fn auth(&self) -> &AuthAppService {
        &self.auth
    }

    pub fn directory(&self) -> &Arc<EventDirectory> {
        &self.directory
    }

    pub fn signups(&self) -> &Arc<SignupCoordinator> {
        &self.signups
    }

    pub fn editor(&self) -> &Arc<AdminEventEditor> {
        &self.editor
    }

    pub fn roles(&self) -> &Arc<RoleResolver> {
        &self.resolver
    }

    /// A fresh session tracker over the shared provider.
    ///
    /// Each mounted view owns one and tears it down on unmount.
    pub fn tracker(&self) -> Arc<IdentitySessionTracker> {
        Arc::new(IdentitySessionTracker::new(self.provider.clone()))
    }

    /// Guard for the admin dashboard
    pub fn route_guard(&self, tracker: Arc<IdentitySessionTracker>) -> RouteGuard {
        RouteGuard::new(tracker, self.resolver.clone(), self.event_bus.sender())
    }

    pub fn event_detail_view(&self, tracker: Arc<IdentitySessionTracker>) -> EventDetailView {
        EventDetailView::new(self.directory.clone(), self.signups.clone(), tracker)
    }

    /// Open the dashboard for a decision returned by `route_guard(..).evaluate()`
    pub fn admin_dashboard(&self, access: &GuardDecision) -> ClientResult<AdminDashboard> {
        AdminDashboard::open(access, self.editor.clone(), self.directory.clone())
    }

    /// Subscribe to events from all services
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }
}
