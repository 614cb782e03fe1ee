//! HTTP client for the events/signups data service.
//!
//! Listing is a full-collection fetch; all filtering happens client-side.
//! Admin writes answer with `{ "data": [Event] }`.

use std::sync::Arc;

use async_trait::async_trait;
use hevents_core::{
    ClientConfig, ClientError, Event, EventFields, EventId, EventRepository, RepoResult, Signup,
    SignupRepository,
};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::http::{self, AccessTokenSource};

/// Response wrapper from the admin endpoints
#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    event_id: &'a EventId,
    user_email: &'a str,
}

/// Client for the remote data service.
///
/// Implements both `EventRepository` and `SignupRepository`.
pub struct EventsApiClient {
    base_url: String,
    client: reqwest::Client,
    tokens: Option<Arc<dyn AccessTokenSource>>,
}

impl EventsApiClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            tokens: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            http::build_client(config.request_timeout),
        )
    }

    /// Attach bearer tokens from a signed-in session to every request
    pub fn with_token_source(mut self, tokens: Arc<dyn AccessTokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        http::join_url(&self.base_url, path)
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.tokens {
            Some(tokens) => match tokens.access_token().await {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> RepoResult<reqwest::Response> {
        self.authorized(request)
            .await
            .send()
            .await
            .map_err(|e| http::transport_error(context, e))
    }

    /// First record of an admin write response; an empty array means the id
    /// did not match anything.
    fn first_record(response: DataResponse<Event>, id: Option<&EventId>) -> RepoResult<Event> {
        response.data.into_iter().next().ok_or_else(|| match id {
            Some(id) => ClientError::not_found(format!("event {}", id)),
            None => ClientError::transport("write response contained no event"),
        })
    }
}

#[async_trait]
impl EventRepository for EventsApiClient {
    async fn list(&self) -> RepoResult<Vec<Event>> {
        let url = self.url("/events");
        debug!(url = %url, "[EventsApiClient] Fetching events");

        let response = self
            .send(self.client.get(&url), "failed to fetch events")
            .await?;
        let events: Vec<Event> = http::json(response, "failed to parse events").await?;

        debug!(count = events.len(), "[EventsApiClient] Fetched events");
        Ok(events)
    }

    async fn create(&self, fields: &EventFields) -> RepoResult<Event> {
        let response = self
            .send(
                self.client.post(self.url("/admin/events")).json(fields),
                "failed to create event",
            )
            .await?;
        let body: DataResponse<Event> =
            http::json(response, "failed to parse created event").await?;
        let event = Self::first_record(body, None)?;

        info!(event_id = %event.id, "[EventsApiClient] Created event");
        Ok(event)
    }

    async fn update(&self, id: &EventId, fields: &EventFields) -> RepoResult<Event> {
        let url = self.url(&format!("/admin/events/{}", urlencoding::encode(id.as_str())));
        let response = self
            .send(self.client.put(url).json(fields), "failed to update event")
            .await?;
        let body: DataResponse<Event> =
            http::json(response, "failed to parse updated event").await?;
        let event = Self::first_record(body, Some(id))?;

        info!(event_id = %event.id, "[EventsApiClient] Updated event");
        Ok(event)
    }

    async fn delete(&self, id: &EventId) -> RepoResult<()> {
        let url = self.url(&format!("/admin/events/{}", urlencoding::encode(id.as_str())));
        let response = self
            .send(self.client.delete(url), "failed to delete event")
            .await?;
        http::check(response).await?;

        info!(event_id = %id, "[EventsApiClient] Deleted event");
        Ok(())
    }
}

#[async_trait]
impl SignupRepository for EventsApiClient {
    async fn list_joined(&self, email: &str) -> RepoResult<Vec<Event>> {
        let url = self.url("/signups");
        let response = self
            .send(
                self.client.get(&url).query(&[("email", email)]),
                "failed to fetch signups",
            )
            .await?;
        let events: Vec<Event> = http::json(response, "failed to parse joined events").await?;

        debug!(email = %email, count = events.len(), "[EventsApiClient] Fetched joined events");
        Ok(events)
    }

    async fn create(&self, event_id: &EventId, email: &str) -> RepoResult<Signup> {
        let request = SignupRequest {
            event_id,
            user_email: email,
        };
        let response = self
            .send(
                self.client.post(self.url("/signups")).json(&request),
                "failed to create signup",
            )
            .await?;
        let body = http::check(response)
            .await?
            .bytes()
            .await
            .map_err(|e| http::transport_error("failed to read signup response", e))?;

        // Some deployments answer with an empty body or a wrapper; the request
        // itself is the record in that case.
        let signup = serde_json::from_slice::<Signup>(&body)
            .unwrap_or_else(|_| Signup::new(event_id.clone(), email));

        info!(event_id = %event_id, email = %email, "[EventsApiClient] Created signup");
        Ok(signup)
    }
}
