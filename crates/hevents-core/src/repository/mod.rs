//! Repository traits for remote data access
//!
//! These traits define the interface to the remote data service and the
//! role store without specifying the implementation (HTTP, in-memory, etc.)

use async_trait::async_trait;

use crate::domain::{Event, EventFields, EventId, Role, Signup};
use crate::error::ClientResult;

/// Result type for repository operations
pub type RepoResult<T> = ClientResult<T>;

/// Event repository trait (events collection, admin writes)
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetch the full event collection
    async fn list(&self) -> RepoResult<Vec<Event>>;

    /// Create an event, returning the stored record
    async fn create(&self, fields: &EventFields) -> RepoResult<Event>;

    /// Replace an event's fields, returning the stored record.
    ///
    /// Returns `ClientError::NotFound` when the id does not exist.
    async fn update(&self, id: &EventId, fields: &EventFields) -> RepoResult<Event>;

    /// Delete an event.
    ///
    /// Returns `ClientError::NotFound` when the id does not exist.
    async fn delete(&self, id: &EventId) -> RepoResult<()>;
}

/// Signup repository trait
#[async_trait]
pub trait SignupRepository: Send + Sync {
    /// Events the given email has joined
    async fn list_joined(&self, email: &str) -> RepoResult<Vec<Event>>;

    /// Record a signup.
    ///
    /// A store enforcing `(event_id, user_email)` uniqueness reports a
    /// duplicate as `ClientError::Conflict`.
    async fn create(&self, event_id: &EventId, email: &str) -> RepoResult<Signup>;
}

/// Role store trait
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Look up the stored role for an email. `Ok(None)` when no record exists.
    async fn find_role(&self, email: &str) -> RepoResult<Option<Role>>;
}
