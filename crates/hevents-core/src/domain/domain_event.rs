//! Domain Events - notifications emitted after successful operations
//!
//! Application services emit these on the event bus once a remote write (or
//! an authorization decision) has happened. Presentation layers subscribe to
//! show notices.
//!
//! # Serialization
//!
//! Events serialize with a `type` field containing the snake_case variant name:
//! ```json
//! { "type": "signup_created", "event_id": "42", "user_email": "ana@example.com" }
//! ```

use serde::{Deserialize, Serialize};

use super::{EventId, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    // ════════════════════════════════════════════════════════════════════════
    // SESSION
    // ════════════════════════════════════════════════════════════════════════
    /// A user signed in and their role was resolved
    SignedIn { email: String, role: Role },

    /// The current user signed out
    SignedOut {
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },

    /// A protected view refused a visitor
    AccessDenied {
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        view: String,
    },

    // ════════════════════════════════════════════════════════════════════════
    // SIGNUPS
    // ════════════════════════════════════════════════════════════════════════
    /// A signup write succeeded
    SignupCreated { event_id: EventId, user_email: String },

    // ════════════════════════════════════════════════════════════════════════
    // EVENT ADMINISTRATION
    // ════════════════════════════════════════════════════════════════════════
    EventCreated { event_id: EventId, title: String },

    EventUpdated { event_id: EventId, title: String },

    EventDeleted { event_id: EventId },
}

impl DomainEvent {
    /// snake_case variant name, as in the serialized `type` field
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SignedIn { .. } => "signed_in",
            Self::SignedOut { .. } => "signed_out",
            Self::AccessDenied { .. } => "access_denied",
            Self::SignupCreated { .. } => "signup_created",
            Self::EventCreated { .. } => "event_created",
            Self::EventUpdated { .. } => "event_updated",
            Self::EventDeleted { .. } => "event_deleted",
        }
    }
}
