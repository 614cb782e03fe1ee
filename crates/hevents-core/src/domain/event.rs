//! Event entity - a community event as served by the remote data service

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable, remote-assigned event identifier.
///
/// The remote service may encode ids as JSON strings or integers. Equality,
/// ordering and hashing are textual (`1` equals `"1"`), but an id read as an
/// integer is written back as an integer.
#[derive(Debug, Clone)]
pub struct EventId {
    text: String,
    numeric: bool,
}

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            numeric: false,
        }
    }

    /// An id the service encodes as a JSON integer
    pub fn numeric(id: i64) -> Self {
        Self {
            text: id.to_string(),
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl PartialEq for EventId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for EventId {}

impl Hash for EventId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for EventId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<i64> for EventId {
    fn from(n: i64) -> Self {
        Self::numeric(n)
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.text.parse::<i64>() {
            Ok(n) if self.numeric => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EventId::new(s),
            RawId::Number(n) => EventId::numeric(n),
        })
    }
}

/// Time-of-day encoding used on the wire.
///
/// Accepts `HH:MM` (HTML time inputs) and `HH:MM:SS` (SQL `time` columns),
/// always writes `HH:MM`.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%H:%M";

    pub fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(WRITE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}'", raw)))
    }
}

/// Editable fields of an event (everything except the id).
///
/// This is the write payload for admin create/update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub location: String,
    pub image_url: String,
    #[serde(default)]
    pub category: String,
}

/// A community event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
}

impl Event {
    /// Build an event from a remote id and its fields
    pub fn from_fields(id: impl Into<EventId>, fields: EventFields) -> Self {
        Self {
            id: id.into(),
            title: fields.title,
            description: fields.description,
            date: fields.date,
            time: fields.time,
            location: fields.location,
            image_url: fields.image_url,
            category: fields.category,
        }
    }

    /// Copy of the editable fields (used to pre-fill the edit form)
    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            time: self.time,
            location: self.location.clone(),
            image_url: self.image_url.clone(),
            category: self.category.clone(),
        }
    }

    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }
}
