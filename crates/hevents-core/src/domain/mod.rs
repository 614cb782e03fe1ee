//! Domain entities, value objects, and events
//!
//! This module contains all domain-level types for hevents:
//! - Entities (Event, Signup)
//! - Value Objects (EventId, Identity, Role, SessionChange)
//! - Form schema for event editing
//! - Domain Events (DomainEvent enum for event-driven architecture)

mod domain_event;
mod event;
pub mod form;
mod identity;
mod signup;

pub use domain_event::DomainEvent;

pub use event::{time_of_day, Event, EventFields, EventId};
pub use form::{EventForm, FieldKind, FieldSchema, EVENT_FORM_SCHEMA};
pub use identity::{Identity, Role, SessionChange, SessionChangeKind};
pub use signup::Signup;
