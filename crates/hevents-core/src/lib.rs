//! # hevents Core Library
//!
//! Domain logic, entities, and business rules for the hevents client.
//!
//! ## Modules
//!
//! - `domain` - Core entities (Event, Signup, Identity, Role) and domain events
//! - `error` - Client error taxonomy shared by every layer
//! - `config` - Environment-backed client configuration
//! - `repository` - Data access traits for the remote service
//! - `session` - Identity provider trait and session tracking
//! - `service` - Domain services (event directory, role resolution, calendar links)
//! - `application` - Application services with event emission
//! - `event_bus` - Central event distribution system

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod event_bus;
pub mod repository;
pub mod service;
pub mod session;

// Re-export commonly used types
pub use domain::*;
pub use error::{ClientError, ClientResult};
pub use repository::*;
pub use service::*;

// Event-driven architecture exports
pub use application::{
    AdminDashboard, AdminEventEditor, ApplicationServices, ApplicationServicesBuilder,
    AuthAppService, EventDetail, EventDetailView, GuardDecision, GuardState, JoinOutcome,
    LoginOutcome, Route, RouteGuard, SignupCoordinator, SignupPanel,
};
pub use config::ClientConfig;
pub use event_bus::{EventBus, EventReceiver, EventSender};
pub use session::{IdentityProvider, IdentitySessionTracker, SessionChannel, SessionState};
