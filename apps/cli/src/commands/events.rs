//! Browse commands: list, show, categories.

use anyhow::{Context, Result};
use hevents_core::{categories as event_categories, EventFilter, EventId, SignupPanel};
use serde_json::json;
use tracing::info;

use super::{event_line, print_events, print_json};
use crate::state::AppState;

pub async fn list(
    state: &AppState,
    search: &str,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let mut filter = EventFilter::new().with_search(search);
    if let Some(category) = category {
        filter = filter.with_category(category);
    }

    let events = state
        .services
        .directory()
        .search(&filter)
        .await
        .context("Failed to load events")?;

    info!(count = events.len(), "[events list] Returning events");
    print_events(&events, json)
}

/// Show one event. Signs in first when credentials are available so the
/// signup panel reflects the account.
pub async fn show(state: &AppState, id: &EventId, json: bool) -> Result<()> {
    state.sign_in_if_possible().await?;

    let tracker = state.services.tracker();
    let view = state.services.event_detail_view(tracker.clone());
    let detail = view.load(id).await;
    tracker.teardown().await;
    let detail = detail.with_context(|| format!("Failed to load event {}", id))?;

    if json {
        return print_json(&json!({
            "event": detail.event,
            "related": detail.related,
            "calendar_link": detail.calendar_link,
            "signup": match &detail.signup {
                SignupPanel::LoginRequired => json!({ "status": "login_required" }),
                SignupPanel::Available { email } => json!({ "status": "available", "email": email }),
                SignupPanel::AlreadyJoined { email } => json!({ "status": "joined", "email": email }),
            },
        }));
    }

    let event = &detail.event;
    println!("{}", event.title);
    println!(
        "  When:     {} {}",
        event.date.format("%A, %B %-d, %Y"),
        event.time.format("%H:%M")
    );
    println!("  Where:    {}", event.location);
    if event.has_category() {
        println!("  Category: {}", event.category);
    }
    if !event.image_url.is_empty() {
        println!("  Image:    {}", event.image_url);
    }
    println!();
    println!("{}", event.description);
    println!();
    println!("Add to calendar: {}", detail.calendar_link);

    match &detail.signup {
        SignupPanel::LoginRequired => println!("Log in to sign up for this event."),
        SignupPanel::Available { .. } => {
            println!("Not joined yet: run `hevents join {}`", event.id)
        }
        SignupPanel::AlreadyJoined { .. } => println!("You're signed up for this event."),
    }

    if !detail.related.is_empty() {
        println!();
        println!("Related events:");
        for related in &detail.related {
            println!("{}", event_line(related));
        }
    }
    Ok(())
}

pub async fn categories(state: &AppState, json: bool) -> Result<()> {
    let events = state
        .services
        .directory()
        .list_events()
        .await
        .context("Failed to load events")?;
    let categories = event_categories(&events);

    if json {
        return print_json(&categories);
    }
    for category in categories {
        println!("{}", category);
    }
    Ok(())
}
