//! Identity Session Tracker
//!
//! Tracks the current identity for one consuming view. The tracker starts in
//! `Pending`, resolves the provider's current user once, then applies every
//! session change it receives until `teardown()` is called.
//!
//! ```text
//!            start()                 SessionChange
//! Pending ───────────► Anonymous ◄──────────────► SignedIn(identity)
//!                      (also on lookup failure)
//! ```

use std::sync::Arc;

use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::IdentityProvider;
use crate::domain::Identity;

/// Tracked session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Initial lookup not finished yet
    #[default]
    Pending,
    Anonymous,
    SignedIn(Identity),
}

impl SessionState {
    fn from_identity(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self::SignedIn(identity),
            None => Self::Anonymous,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Per-view projection of the identity provider's session.
pub struct IdentitySessionTracker {
    provider: Arc<dyn IdentityProvider>,
    state: Arc<watch::Sender<SessionState>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl IdentitySessionTracker {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(SessionState::Pending);
        Self {
            provider,
            state: Arc::new(state),
            listener: Mutex::new(None),
        }
    }

    /// Create and start a tracker in one step
    pub async fn started(provider: Arc<dyn IdentityProvider>) -> Self {
        let tracker = Self::new(provider);
        tracker.start().await;
        tracker
    }

    /// Resolve the current session and begin listening for changes.
    ///
    /// Subscribes before the lookup so a transition racing the lookup is
    /// applied after it. A failed lookup leaves the tracker `Anonymous`.
    /// Calling `start` on a running tracker does nothing.
    pub async fn start(&self) {
        let mut listener = self.listener.lock().await;
        if listener.is_some() {
            return;
        }

        let changes = self.provider.subscribe();

        let initial = match self.provider.current_user().await {
            Ok(identity) => SessionState::from_identity(identity),
            Err(e) => {
                warn!(error = %e, "[SessionTracker] Current user lookup failed, treating as anonymous");
                SessionState::Anonymous
            }
        };
        info!(
            signed_in = initial.identity().is_some(),
            "[SessionTracker] Session resolved"
        );
        self.state.send_replace(initial);

        *listener = Some(tokio::spawn(Self::listen(changes, self.state.clone())));
    }

    async fn listen(
        mut changes: broadcast::Receiver<crate::domain::SessionChange>,
        state: Arc<watch::Sender<SessionState>>,
    ) {
        loop {
            match changes.recv().await {
                Ok(change) => {
                    debug!(kind = ?change.kind, "[SessionTracker] Applying session change");
                    state.send_replace(SessionState::from_identity(change.identity));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "[SessionTracker] Missed session changes");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("[SessionTracker] Provider channel closed");
                    break;
                }
            }
        }
    }

    /// Unregister the session subscription.
    ///
    /// Waits until the listener is gone, so once this returns no further
    /// change reaches the tracker. Safe to call more than once.
    pub async fn teardown(&self) {
        let handle = self.listener.lock().await.take();
        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
            debug!("[SessionTracker] Subscription released");
        }
    }

    pub async fn is_listening(&self) -> bool {
        self.listener.lock().await.is_some()
    }

    /// Snapshot of the tracked state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Current identity, `None` while pending or anonymous
    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    /// Wait for the initial lookup and return the identity it produced
    pub async fn resolved(&self) -> Option<Identity> {
        let mut rx = self.state.subscribe();
        loop {
            {
                let current = rx.borrow_and_update();
                if !current.is_pending() {
                    return current.identity().cloned();
                }
            }
            if rx.changed().await.is_err() {
                return None;
            }
        }
    }

    /// Receiver that observes every state change
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl Drop for IdentitySessionTracker {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.get_mut().take() {
            handle.abort();
        }
    }
}
