//! Event detail view model
//!
//! Combines the directory (event + related events), the session tracker
//! (who is looking) and the signup coordinator (may they join).

use std::sync::Arc;

use tracing::warn;

use crate::domain::{Event, EventId};
use crate::error::{ClientError, ClientResult};
use crate::service::{calendar_link, related_events, EventDirectory};
use crate::session::IdentitySessionTracker;

use super::signup::{JoinOutcome, SignupCoordinator};

/// Signup section of the detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupPanel {
    /// Anonymous visitor: show a link to log in
    LoginRequired,
    /// Signed in, not joined yet: show the signup button
    Available { email: String },
    /// Signed in and already joined
    AlreadyJoined { email: String },
}

impl SignupPanel {
    fn for_email(email: String, joined: bool) -> Self {
        if joined {
            Self::AlreadyJoined { email }
        } else {
            Self::Available { email }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub event: Event,
    pub related: Vec<Event>,
    pub calendar_link: String,
    pub signup: SignupPanel,
}

pub struct EventDetailView {
    directory: Arc<EventDirectory>,
    coordinator: Arc<SignupCoordinator>,
    tracker: Arc<IdentitySessionTracker>,
}

impl EventDetailView {
    pub fn new(
        directory: Arc<EventDirectory>,
        coordinator: Arc<SignupCoordinator>,
        tracker: Arc<IdentitySessionTracker>,
    ) -> Self {
        Self {
            directory,
            coordinator,
            tracker,
        }
    }

    /// Load the page.
    ///
    /// `ClientError::NotFound` when the id is not in the current list; any
    /// other error means the list itself could not be loaded.
    pub async fn load(&self, id: &EventId) -> ClientResult<EventDetail> {
        let events = self.directory.list_events().await?;
        let event = events
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| ClientError::not_found(format!("event {}", id)))?;

        let related = related_events(&events, &event).into_iter().cloned().collect();
        let signup = self.signup_panel(&event.id).await;

        Ok(EventDetail {
            calendar_link: calendar_link(&event),
            event,
            related,
            signup,
        })
    }

    async fn signup_panel(&self, event_id: &EventId) -> SignupPanel {
        self.tracker.start().await;
        let Some(identity) = self.tracker.resolved().await else {
            return SignupPanel::LoginRequired;
        };

        let joined = match self.coordinator.has_signed_up(event_id, &identity.email).await {
            Ok(joined) => joined,
            Err(e) => {
                warn!(event_id = %event_id, error = %e, "[EventDetailView] Signup check failed");
                false
            }
        };
        SignupPanel::for_email(identity.email, joined)
    }

    /// Join the shown event and refresh the panel from the coordinator's re-check
    pub async fn join(&self, detail: &mut EventDetail) -> ClientResult<JoinOutcome> {
        let email = match &detail.signup {
            SignupPanel::LoginRequired => {
                return Err(ClientError::Unauthorized(
                    "log in to sign up for this event".to_string(),
                ))
            }
            SignupPanel::Available { email } | SignupPanel::AlreadyJoined { email } => {
                email.clone()
            }
        };

        let outcome = self.coordinator.join(&detail.event.id, &email).await?;
        detail.signup = SignupPanel::for_email(email, outcome.is_signed_up());
        Ok(outcome)
    }
}
