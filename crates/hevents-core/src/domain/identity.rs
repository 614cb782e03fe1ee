//! Identity and role value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only projection of the identity provider's session.
///
/// `email` is the stable reference used for signups and role lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Coarse authorization level attached to an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Staff,
    /// Everyone who is not staff - this is the default
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Member => "member",
        }
    }

    /// Parse a stored role value.
    ///
    /// Anything other than exactly `staff` is treated as `member`, so a typo
    /// or a new role name in the store can never grant admin access.
    pub fn from_stored(s: &str) -> Self {
        if s.trim() == "staff" {
            Self::Staff
        } else {
            Self::Member
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a session-change notification carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionChangeKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// A session transition reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionChange {
    pub kind: SessionChangeKind,
    pub identity: Option<Identity>,
}

impl SessionChange {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            kind: SessionChangeKind::SignedIn,
            identity: Some(identity),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            kind: SessionChangeKind::SignedOut,
            identity: None,
        }
    }
}
