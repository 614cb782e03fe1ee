//! Signup entity - links one identity to one event

use serde::{Deserialize, Serialize};

use super::EventId;

/// A join record.
///
/// At most one signup may exist per `(event_id, user_email)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signup {
    pub event_id: EventId,
    pub user_email: String,
}

impl Signup {
    pub fn new(event_id: EventId, user_email: impl Into<String>) -> Self {
        Self {
            event_id,
            user_email: user_email.into(),
        }
    }
}
