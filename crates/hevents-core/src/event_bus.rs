//! Event Bus - distribution of domain notifications
//!
//! Application services emit a `DomainEvent` after every successful remote
//! write or authorization decision. Presentation code subscribes to show
//! notices ("You've successfully signed up!", "Access denied"); services
//! never call it directly.
//!
//! ```text
//!  Producers                        Consumers
//!  ├─ SignupCoordinator   ──┐
//!  ├─ AdminEventEditor    ──┼─ bus ───► CLI notice printer (stderr)
//!  ├─ RouteGuard          ──┤
//!  └─ AuthAppService      ──┘
//! ```

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::DomainEvent;

/// Notices queued per subscriber before the oldest are dropped
const NOTICE_BACKLOG: usize = 64;

/// Broadcast hub for domain notifications.
///
/// A subscriber sees every event emitted after it subscribed.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_BACKLOG);
        Self { tx }
    }

    /// Emitting handle handed to application services
    pub fn sender(&self) -> EventSender {
        EventSender { tx: self.tx.clone() }
    }

    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct EventSender {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventSender {
    /// Publish a notice; returns how many views will see it.
    ///
    /// Zero listeners is normal for a CLI run and only logged at debug.
    pub fn emit(&self, event: DomainEvent) -> usize {
        let kind = event.type_name();
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(event_type = kind, receivers = delivered, "[EventBus] Emitted");
        delivered
    }
}

/// One view's subscription
pub struct EventReceiver {
    rx: broadcast::Receiver<DomainEvent>,
}

impl EventReceiver {
    /// Next notice, or `None` once every sender is gone.
    /// Skipped notices after lag are logged, not returned.
    pub async fn recv(&mut self) -> Option<DomainEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "[EventBus] View fell behind, notices dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Notices already queued, without waiting
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        let mut queued = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => queued.push(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!(skipped = n, "[EventBus] View fell behind, notices dropped");
                }
                Err(_) => return queued,
            }
        }
    }
}
