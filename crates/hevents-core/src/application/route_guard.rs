//! Route Guard
//!
//! Gates a protected view on identity + role. The check runs once per mount:
//!
//! ```text
//!            no identity
//! Pending ─────────────────► Anonymous   (redirect Login)
//!    │       role == staff
//!    ├─────────────────────► Authorized  (render)
//!    │       anything else
//!    └─────────────────────► Denied      (notice, redirect Home)
//! ```
//!
//! The decision is not revisited when the session or role changes while the
//! view stays mounted.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainEvent, EventId, Identity};
use crate::event_bus::EventSender;
use crate::service::RoleResolver;
use crate::session::IdentitySessionTracker;

/// Notice shown to signed-in visitors without staff role
pub const ACCESS_DENIED_NOTICE: &str = "Access denied";

/// Client-side routes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Calendar,
    Browse,
    Admin,
    EventDetail(EventId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Calendar => "/calendar".to_string(),
            Self::Browse => "/browse".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::EventDetail(id) => format!("/events/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Pending,
    Anonymous,
    Authorized(Identity),
    Denied(Identity),
}

/// What the view should do after the guard ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub state: GuardState,
    pub redirect: Option<Route>,
    pub notice: Option<String>,
}

impl GuardDecision {
    fn anonymous() -> Self {
        Self {
            state: GuardState::Anonymous,
            redirect: Some(Route::Login),
            notice: None,
        }
    }

    fn authorized(identity: Identity) -> Self {
        Self {
            state: GuardState::Authorized(identity),
            redirect: None,
            notice: None,
        }
    }

    fn denied(identity: Identity) -> Self {
        Self {
            state: GuardState::Denied(identity),
            redirect: Some(Route::Home),
            notice: Some(ACCESS_DENIED_NOTICE.to_string()),
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self.state, GuardState::Authorized(_))
    }

    /// The staff identity, when authorized
    pub fn authorized_identity(&self) -> Option<&Identity> {
        match &self.state {
            GuardState::Authorized(identity) => Some(identity),
            _ => None,
        }
    }
}

/// One guard per protected-view mount
pub struct RouteGuard {
    tracker: Arc<IdentitySessionTracker>,
    resolver: Arc<RoleResolver>,
    event_sender: EventSender,
    view: Route,
    decision: Option<GuardDecision>,
}

impl RouteGuard {
    pub fn new(
        tracker: Arc<IdentitySessionTracker>,
        resolver: Arc<RoleResolver>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            tracker,
            resolver,
            event_sender,
            view: Route::Admin,
            decision: None,
        }
    }

    /// Guard a view other than the admin dashboard
    pub fn for_view(mut self, view: Route) -> Self {
        self.view = view;
        self
    }

    pub fn state(&self) -> GuardState {
        self.decision
            .as_ref()
            .map(|d| d.state.clone())
            .unwrap_or(GuardState::Pending)
    }

    /// Run the check. Later calls return the first decision unchanged.
    pub async fn evaluate(&mut self) -> GuardDecision {
        if let Some(decision) = &self.decision {
            return decision.clone();
        }

        self.tracker.start().await;
        let decision = match self.tracker.resolved().await {
            None => {
                info!(view = %self.view, "[RouteGuard] Anonymous visitor, redirecting to login");
                GuardDecision::anonymous()
            }
            Some(identity) => {
                let role = self.resolver.effective_role(&identity).await;
                if role.is_staff() {
                    info!(view = %self.view, email = %identity.email, "[RouteGuard] Authorized");
                    GuardDecision::authorized(identity)
                } else {
                    warn!(view = %self.view, email = %identity.email, role = %role, "[RouteGuard] Access denied");
                    self.event_sender.emit(DomainEvent::AccessDenied {
                        email: Some(identity.email.clone()),
                        view: self.view.path(),
                    });
                    GuardDecision::denied(identity)
                }
            }
        };

        self.decision = Some(decision.clone());
        decision
    }
}
