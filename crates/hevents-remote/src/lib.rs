//! hevents Remote Adapters
//!
//! reqwest implementations of the core repository and identity traits.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │      hevents-core traits                     │
//! │ EventRepository  SignupRepository            │
//! │ RoleRepository   IdentityProvider            │
//! ├──────────────────────────────────────────────┤
//! │ EventsApiClient  (data service)              │
//! │ RoleApiClient    (role store)                │
//! │ AuthApiClient    (identity provider)         │
//! ├──────────────────────────────────────────────┤
//! │ http: client builder, status → ClientError   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = ClientConfig::load()?;
//! let auth = Arc::new(AuthApiClient::from_config(&config));
//! let data = Arc::new(EventsApiClient::from_config(&config).with_token_source(auth.clone()));
//! let roles = Arc::new(RoleApiClient::from_config(&config).with_token_source(auth.clone()));
//! ```

mod auth_api;
mod events_api;
pub mod http;
mod role_api;

pub use auth_api::AuthApiClient;
pub use events_api::EventsApiClient;
pub use http::AccessTokenSource;
pub use role_api::RoleApiClient;
