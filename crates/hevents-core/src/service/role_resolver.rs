//! Role resolver - looks up the stored role for an identity

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Identity, Role};
use crate::error::{ClientError, ClientResult};
use crate::repository::RoleRepository;

/// Resolves `staff` / `member` for an identity.
///
/// Every call performs exactly one lookup; nothing is cached, so each
/// protected view re-resolves on mount.
pub struct RoleResolver {
    roles: Arc<dyn RoleRepository>,
}

impl RoleResolver {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    /// Look up the role.
    ///
    /// A missing record is `ClientError::NotFound`, kept distinct from
    /// `Member` so callers can log or display the difference.
    pub async fn resolve(&self, identity: &Identity) -> ClientResult<Role> {
        match self.roles.find_role(&identity.email).await? {
            Some(role) => {
                debug!(email = %identity.email, role = %role, "[RoleResolver] Role resolved");
                Ok(role)
            }
            None => Err(ClientError::not_found(format!(
                "no role record for {}",
                identity.email
            ))),
        }
    }

    /// Role to act on.
    ///
    /// Missing records and lookup failures both yield `Member`.
    pub async fn effective_role(&self, identity: &Identity) -> Role {
        Self::fail_closed(&identity.email, self.resolve(identity).await)
    }

    /// Map a resolution result onto the non-privileged path when ambiguous
    pub fn fail_closed(email: &str, resolution: ClientResult<Role>) -> Role {
        match resolution {
            Ok(role) => role,
            Err(e) => {
                warn!(
                    email = %email,
                    error = %e,
                    error_kind = e.kind(),
                    "[RoleResolver] Role unavailable, treating as member"
                );
                Role::Member
            }
        }
    }
}
