//! Calendar export helpers.
//!
//! Google Calendar "add event" deep link for an event.

use chrono::NaiveDateTime;

use crate::domain::Event;

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Compact UTC stamp, e.g. `20240704T183000Z`.
///
/// The event's date and time are taken as UTC-naive; no zone conversion.
pub fn compact_utc(event: &Event) -> String {
    NaiveDateTime::new(event.date, event.time)
        .format("%Y%m%dT%H%M%SZ")
        .to_string()
}

/// Generate the Google Calendar template link for an event.
///
/// Start and end are the same instant.
pub fn calendar_link(event: &Event) -> String {
    let stamp = compact_utc(event);
    format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        GOOGLE_CALENDAR_RENDER_URL,
        urlencoding::encode(&event.title),
        stamp,
        stamp,
        urlencoding::encode(&event.description),
        urlencoding::encode(&event.location),
    )
}
