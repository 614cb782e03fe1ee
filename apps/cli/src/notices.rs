//! Notices from the application event bus, printed to stderr after a command.

use hevents_core::{DomainEvent, EventReceiver};

pub fn notice_text(event: &DomainEvent) -> String {
    match event {
        DomainEvent::SignedIn { email, role } => format!("Signed in as {} ({})", email, role),
        DomainEvent::SignedOut { email: Some(email) } => format!("Signed out {}", email),
        DomainEvent::SignedOut { email: None } => "Signed out".to_string(),
        DomainEvent::AccessDenied { email, view } => match email {
            Some(email) => format!("Access denied to {} for {}", view, email),
            None => format!("Access denied to {}", view),
        },
        DomainEvent::SignupCreated {
            event_id,
            user_email,
        } => format!(
            "You've successfully signed up! ({} joined event {})",
            user_email, event_id
        ),
        DomainEvent::EventCreated { event_id, title } => {
            format!("Event {} created: {}", event_id, title)
        }
        DomainEvent::EventUpdated { event_id, title } => {
            format!("Event {} updated: {}", event_id, title)
        }
        DomainEvent::EventDeleted { event_id } => format!("Event {} deleted", event_id),
    }
}

/// Print whatever the command emitted; stdout stays reserved for results
pub fn print_notices(notices: &mut EventReceiver) {
    for event in notices.drain() {
        eprintln!("» {}", notice_text(&event));
    }
}
