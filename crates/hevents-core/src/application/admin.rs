//! Admin Event Application Service
//!
//! `AdminEventEditor` performs the remote writes and emits events.
//! `AdminDashboard` is the admin view: it owns a private copy of the event
//! list and patches it after each successful write instead of re-fetching.
//!
//! Authorization happens once, when the dashboard is opened with the route
//! guard's decision; individual writes are not re-authorized.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{DomainEvent, Event, EventFields, EventForm, EventId};
use crate::error::{ClientError, ClientResult};
use crate::event_bus::EventSender;
use crate::repository::EventRepository;
use crate::service::{EventDirectory, LoadState};

use super::route_guard::GuardDecision;

/// Remote write path for events
pub struct AdminEventEditor {
    events: Arc<dyn EventRepository>,
    event_sender: EventSender,
}

impl AdminEventEditor {
    pub fn new(events: Arc<dyn EventRepository>, event_sender: EventSender) -> Self {
        Self {
            events,
            event_sender,
        }
    }

    fn check_fields(fields: &EventFields) -> ClientResult<()> {
        let blank: Vec<&str> = [
            ("title", &fields.title),
            ("description", &fields.description),
            ("location", &fields.location),
            ("image_url", &fields.image_url),
            ("category", &fields.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(ClientError::validation(format!(
                "missing required fields: {}",
                blank.join(", ")
            )))
        }
    }

    /// Create an event
    ///
    /// Emits: `EventCreated`
    pub async fn create(&self, fields: &EventFields) -> ClientResult<Event> {
        Self::check_fields(fields)?;
        let event = self.events.create(fields).await?;

        info!(event_id = %event.id, title = %event.title, "[AdminEventEditor] Created event");
        self.event_sender.emit(DomainEvent::EventCreated {
            event_id: event.id.clone(),
            title: event.title.clone(),
        });
        Ok(event)
    }

    /// Replace an event's fields
    ///
    /// Emits: `EventUpdated`
    pub async fn update(&self, id: &EventId, fields: &EventFields) -> ClientResult<Event> {
        Self::check_fields(fields)?;
        let event = self.events.update(id, fields).await?;

        info!(event_id = %event.id, title = %event.title, "[AdminEventEditor] Updated event");
        self.event_sender.emit(DomainEvent::EventUpdated {
            event_id: event.id.clone(),
            title: event.title.clone(),
        });
        Ok(event)
    }

    /// Delete an event
    ///
    /// Emits: `EventDeleted`
    pub async fn delete(&self, id: &EventId) -> ClientResult<()> {
        self.events.delete(id).await?;

        info!(event_id = %id, "[AdminEventEditor] Deleted event");
        self.event_sender
            .emit(DomainEvent::EventDeleted { event_id: id.clone() });
        Ok(())
    }
}

/// Admin view with its own event list
pub struct AdminDashboard {
    editor: Arc<AdminEventEditor>,
    directory: Arc<EventDirectory>,
    events: LoadState<Vec<Event>>,
    form: EventForm,
    editing: Option<EventId>,
}

impl AdminDashboard {
    /// Open the dashboard for a guard decision.
    ///
    /// Anything but `Authorized` is `ClientError::Unauthorized`.
    pub fn open(
        access: &GuardDecision,
        editor: Arc<AdminEventEditor>,
        directory: Arc<EventDirectory>,
    ) -> ClientResult<Self> {
        if !access.is_authorized() {
            return Err(ClientError::Unauthorized(
                "the admin dashboard requires staff access".to_string(),
            ));
        }
        Ok(Self {
            editor,
            directory,
            events: LoadState::Loading,
            form: EventForm::new(),
            editing: None,
        })
    }

    /// Fetch this view's copy of the event list
    pub async fn load(&mut self) -> &LoadState<Vec<Event>> {
        self.events = self.directory.load().await;
        &self.events
    }

    pub fn load_state(&self) -> &LoadState<Vec<Event>> {
        &self.events
    }

    /// Locally held events (empty until loaded)
    pub fn events(&self) -> &[Event] {
        self.events.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    pub fn editing(&self) -> Option<&EventId> {
        self.editing.as_ref()
    }

    /// Switch the form to edit mode for a listed event
    pub fn begin_edit(&mut self, id: &EventId) -> ClientResult<()> {
        let event = self
            .events()
            .iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| ClientError::not_found(format!("event {}", id)))?;
        self.form = EventForm::from_event(event);
        self.editing = Some(id.clone());
        Ok(())
    }

    /// Back to an empty create form
    pub fn reset_form(&mut self) {
        self.form = EventForm::new();
        self.editing = None;
    }

    /// Submit the form: update when editing, create otherwise.
    ///
    /// On success the form is reset; on failure it is kept for correction.
    pub async fn submit(&mut self) -> ClientResult<Event> {
        let fields = self.form.to_fields()?;
        let event = match self.editing.clone() {
            Some(id) => self.update(&id, &fields).await?,
            None => self.create(&fields).await?,
        };
        self.reset_form();
        Ok(event)
    }

    pub async fn create(&mut self, fields: &EventFields) -> ClientResult<Event> {
        let event = self.editor.create(fields).await?;
        if let LoadState::Loaded(events) = &mut self.events {
            events.push(event.clone());
        }
        Ok(event)
    }

    pub async fn update(&mut self, id: &EventId, fields: &EventFields) -> ClientResult<Event> {
        let event = self.editor.update(id, fields).await?;
        if let LoadState::Loaded(events) = &mut self.events {
            match events.iter_mut().find(|e| &e.id == id) {
                Some(slot) => *slot = event.clone(),
                None => {
                    warn!(event_id = %id, "[AdminDashboard] Updated event missing from local list")
                }
            }
        }
        Ok(event)
    }

    pub async fn delete(&mut self, id: &EventId) -> ClientResult<()> {
        self.editor.delete(id).await?;
        if let LoadState::Loaded(events) = &mut self.events {
            events.retain(|e| &e.id != id);
        }
        if self.editing.as_ref() == Some(id) {
            self.reset_form();
        }
        Ok(())
    }
}
