//! Event directory - read path over the remote event collection
//!
//! Listing is a full-collection fetch. Search and category filtering,
//! category discovery and "related events" are computed client-side over the
//! fetched snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Event, EventId};
use crate::error::{ClientError, ClientResult};
use crate::repository::EventRepository;

/// Outcome of a view's load, keeping "failed" apart from "empty"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    /// The read failed; the view should offer a retry
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Client-side filter for the browse view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Case-insensitive substring matched against title or location
    pub search: String,
    /// Exact category; `None` or empty matches every category
    pub category: Option<String>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = event.title.to_lowercase().contains(&needle)
            || event.location.to_lowercase().contains(&needle);

        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => event.category == category,
        };

        matches_search && matches_category
    }

    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct non-empty categories, in first-seen order
pub fn categories(events: &[Event]) -> Vec<String> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|e| e.has_category())
        .filter(|e| seen.insert(e.category.as_str()))
        .map(|e| e.category.clone())
        .collect()
}

/// Other events in the same category ("you might also like")
pub fn related_events<'a>(events: &'a [Event], current: &Event) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.category == current.category && e.id != current.id)
        .collect()
}

/// Read-only access to the remote event collection
pub struct EventDirectory {
    events: Arc<dyn EventRepository>,
}

impl EventDirectory {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn list_events(&self) -> ClientResult<Vec<Event>> {
        let events = self.events.list().await?;
        debug!(count = events.len(), "[EventDirectory] Listed events");
        Ok(events)
    }

    /// Find one event by scanning the listed collection
    pub async fn get_event(&self, id: &EventId) -> ClientResult<Event> {
        self.list_events()
            .await?
            .into_iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| ClientError::not_found(format!("event {}", id)))
    }

    /// List for a view, mapping failure to `LoadState::Failed`
    pub async fn load(&self) -> LoadState<Vec<Event>> {
        let result = self.list_events().await;
        if let Err(e) = &result {
            warn!(error = %e, "[EventDirectory] Failed to load events");
        }
        LoadState::from_result(result)
    }

    /// List and filter in one step
    pub async fn search(&self, filter: &EventFilter) -> ClientResult<Vec<Event>> {
        let events = self.list_events().await?;
        Ok(events.into_iter().filter(|e| filter.matches(e)).collect())
    }
}
