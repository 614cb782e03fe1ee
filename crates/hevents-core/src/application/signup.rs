//! Signup Coordinator
//!
//! Enforces at most one signup per `(event, user)` from the client's side.
//!
//! `join` runs check → write → re-check. The steps are ordered but not atomic:
//! two concurrent joins for the same user (two tabs) can both pass the check.
//! Only a uniqueness constraint in the backing store closes that window; when
//! the store reports it as `Conflict`, the coordinator answers
//! `AlreadySignedUp`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainEvent, Event, EventId, Signup};
use crate::error::{ClientError, ClientResult};
use crate::event_bus::EventSender;
use crate::repository::SignupRepository;

/// Result of a join attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The signup was written.
    ///
    /// `confirmed` is the result of the post-write membership re-check; it is
    /// what a view should display as "already joined".
    Joined { signup: Signup, confirmed: bool },
    /// A signup for this pair already exists; nothing was written
    AlreadySignedUp,
}

impl JoinOutcome {
    /// Whether the user should now be shown as signed up
    pub fn is_signed_up(&self) -> bool {
        match self {
            Self::Joined { confirmed, .. } => *confirmed,
            Self::AlreadySignedUp => true,
        }
    }
}

pub struct SignupCoordinator {
    signups: Arc<dyn SignupRepository>,
    event_sender: EventSender,
}

impl SignupCoordinator {
    pub fn new(signups: Arc<dyn SignupRepository>, event_sender: EventSender) -> Self {
        Self {
            signups,
            event_sender,
        }
    }

    /// Whether `email` has joined `event_id`, derived from the server's
    /// current signup list on every call.
    pub async fn has_signed_up(&self, event_id: &EventId, email: &str) -> ClientResult<bool> {
        let joined = self.signups.list_joined(email).await?;
        Ok(joined.iter().any(|e| &e.id == event_id))
    }

    /// Join an event.
    ///
    /// Errors are returned with their original cause and never retried.
    pub async fn join(&self, event_id: &EventId, email: &str) -> ClientResult<JoinOutcome> {
        if email.trim().is_empty() {
            return Err(ClientError::validation("an email is required to sign up"));
        }

        if self.has_signed_up(event_id, email).await? {
            info!(event_id = %event_id, email = %email, "[SignupCoordinator] Already signed up, skipping write");
            return Ok(JoinOutcome::AlreadySignedUp);
        }

        let signup = match self.signups.create(event_id, email).await {
            Ok(signup) => signup,
            Err(ClientError::Conflict(reason)) => {
                info!(
                    event_id = %event_id,
                    email = %email,
                    reason = %reason,
                    "[SignupCoordinator] Store reported duplicate signup"
                );
                return Ok(JoinOutcome::AlreadySignedUp);
            }
            Err(e) => {
                warn!(event_id = %event_id, email = %email, error = %e, "[SignupCoordinator] Signup failed");
                return Err(e);
            }
        };

        info!(event_id = %event_id, email = %email, "[SignupCoordinator] Signed up");
        self.event_sender.emit(DomainEvent::SignupCreated {
            event_id: signup.event_id.clone(),
            user_email: signup.user_email.clone(),
        });

        let confirmed = match self.has_signed_up(event_id, email).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(event_id = %event_id, "[SignupCoordinator] Signup not visible on re-check");
                false
            }
            Err(e) => {
                warn!(event_id = %event_id, error = %e, "[SignupCoordinator] Re-check failed after signup");
                false
            }
        };

        Ok(JoinOutcome::Joined { signup, confirmed })
    }

    /// The user's joined events, soonest first
    pub async fn joined_events(&self, email: &str) -> ClientResult<Vec<Event>> {
        let mut events = self.signups.list_joined(email).await?;
        events.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        Ok(events)
    }
}
