//! Identity session handling
//!
//! The identity provider is injected as an `IdentityProvider` trait object.
//! It exposes the current user, credential operations, and a single
//! broadcast channel of `SessionChange` notifications. Nothing in hevents
//! reads ambient session state.

mod tracker;

pub use tracker::{IdentitySessionTracker, SessionState};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{Identity, SessionChange};
use crate::error::ClientResult;

/// Capacity of a provider's session-change channel
const SESSION_CHANNEL_CAPACITY: usize = 16;

/// External identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity of the current session, `None` when anonymous
    async fn current_user(&self) -> ClientResult<Option<Identity>>;

    /// Subscribe to session transitions (sign-in, sign-out, refresh, user update)
    fn subscribe(&self) -> broadcast::Receiver<SessionChange>;

    /// Password sign-in. Rejected credentials are `ClientError::Unauthorized`.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> ClientResult<Identity>;

    async fn sign_out(&self) -> ClientResult<()>;

    /// Ask the provider to send a password-reset email
    async fn request_password_reset(&self, email: &str, redirect_to: Option<&str>)
        -> ClientResult<()>;

    /// Change the signed-in user's password
    async fn update_password(&self, new_password: &str) -> ClientResult<()>;
}

/// Broadcast channel for session changes, shared by provider implementations
#[derive(Clone)]
pub struct SessionChannel {
    sender: broadcast::Sender<SessionChange>,
}

impl SessionChannel {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SESSION_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.sender.subscribe()
    }

    /// Publish a change to every live subscriber, returns how many received it
    pub fn publish(&self, change: SessionChange) -> usize {
        let kind = change.kind;
        let count = self.sender.send(change).unwrap_or(0);
        debug!(kind = ?kind, receivers = count, "[SessionChannel] Published session change");
        count
    }

    /// Number of live subscriptions (used to verify teardown)
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SessionChannel {
    fn default() -> Self {
        Self::new()
    }
}
