//! Domain services
//!
//! Read-side logic that operates on domain entities via repositories.

mod calendar_link;
mod event_directory;
mod role_resolver;

pub use calendar_link::{calendar_link, compact_utc};
pub use event_directory::{categories, related_events, EventDirectory, EventFilter, LoadState};
pub use role_resolver::RoleResolver;
