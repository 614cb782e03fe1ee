//! Event form schema and builder
//!
//! The admin form is driven by a static field schema instead of iterating
//! over ad-hoc field names. `EventForm` holds raw text per schema field and
//! validates it into `EventFields`.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::event::time_of_day;
use super::{Event, EventFields};
use crate::error::{ClientError, ClientResult};

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Date,
    Time,
    Url,
}

/// Static description of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// The seven event fields, in display order
pub const EVENT_FORM_SCHEMA: [FieldSchema; 7] = [
    FieldSchema {
        name: "title",
        label: "Title",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSchema {
        name: "description",
        label: "Description",
        kind: FieldKind::LongText,
        required: true,
    },
    FieldSchema {
        name: "date",
        label: "Date",
        kind: FieldKind::Date,
        required: true,
    },
    FieldSchema {
        name: "time",
        label: "Time",
        kind: FieldKind::Time,
        required: true,
    },
    FieldSchema {
        name: "location",
        label: "Location",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSchema {
        name: "image_url",
        label: "Image URL",
        kind: FieldKind::Url,
        required: true,
    },
    FieldSchema {
        name: "category",
        label: "Category",
        kind: FieldKind::Text,
        required: true,
    },
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Look up a field's schema by name
pub fn field_schema(name: &str) -> Option<&'static FieldSchema> {
    EVENT_FORM_SCHEMA.iter().find(|f| f.name == name)
}

/// Form state for creating or editing an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    values: HashMap<&'static str, String>,
}

impl EventForm {
    /// Empty form (create mode)
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled form (edit mode)
    pub fn from_event(event: &Event) -> Self {
        let mut form = Self::new();
        form.values.insert("title", event.title.clone());
        form.values.insert("description", event.description.clone());
        form.values.insert("date", event.date.format(DATE_FORMAT).to_string());
        form.values.insert("time", event.time.format("%H:%M").to_string());
        form.values.insert("location", event.location.clone());
        form.values.insert("image_url", event.image_url.clone());
        form.values.insert("category", event.category.clone());
        form
    }

    /// Schema fields this form renders
    pub fn schema(&self) -> &'static [FieldSchema] {
        &EVENT_FORM_SCHEMA
    }

    /// Set a field value. Unknown field names are rejected.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> ClientResult<()> {
        let schema = field_schema(name)
            .ok_or_else(|| ClientError::validation(format!("unknown form field '{}'", name)))?;
        self.values.insert(schema.name, value.into());
        Ok(())
    }

    /// Builder-style `set`
    pub fn with(mut self, name: &str, value: impl Into<String>) -> ClientResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        EVENT_FORM_SCHEMA
            .iter()
            .filter(|f| f.required && self.get(f.name).trim().is_empty())
            .map(|f| f.name)
            .collect()
    }

    /// Validate the form into a write payload
    pub fn to_fields(&self) -> ClientResult<EventFields> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let date_raw = self.get("date").trim();
        let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
            .map_err(|_| {
                ClientError::validation(format!(
                    "invalid date '{}', expected YYYY-MM-DD",
                    date_raw
                ))
            })?;

        let time_raw = self.get("time");
        let time = time_of_day::parse(time_raw).ok_or_else(|| {
            ClientError::validation(format!("invalid time '{}', expected HH:MM", time_raw.trim()))
        })?;

        Ok(EventFields {
            title: self.get("title").trim().to_string(),
            description: self.get("description").trim().to_string(),
            date,
            time,
            location: self.get("location").trim().to_string(),
            image_url: self.get("image_url").trim().to_string(),
            category: self.get("category").trim().to_string(),
        })
    }
}
