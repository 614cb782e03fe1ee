//! CLI command handlers
//!
//! Each handler takes the shared `AppState`, calls into the application
//! services, and prints either a table-ish text rendering or JSON.

pub mod account;
pub mod admin;
pub mod events;
pub mod signup;

use anyhow::Result;
use hevents_core::Event;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per event: id, date, time, title, location, category
pub(crate) fn event_line(event: &Event) -> String {
    let mut line = format!(
        "{:>6}  {} {}  {}",
        event.id,
        event.date.format("%Y-%m-%d"),
        event.time.format("%H:%M"),
        event.title
    );
    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    if event.has_category() {
        line.push_str(&format!(" [{}]", event.category));
    }
    line
}

pub(crate) fn print_events(events: &[Event], json: bool) -> Result<()> {
    if json {
        return print_json(events);
    }
    if events.is_empty() {
        println!("No events found.");
    }
    for event in events {
        println!("{}", event_line(event));
    }
    Ok(())
}
