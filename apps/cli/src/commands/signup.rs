//! Member commands: join an event, list joined events.

use anyhow::{bail, Context, Result};
use hevents_core::{EventId, JoinOutcome, SignupPanel};
use serde_json::json;

use super::{print_events, print_json};
use crate::state::AppState;

pub async fn join(state: &AppState, id: &EventId, json: bool) -> Result<()> {
    state.sign_in().await?;

    let tracker = state.services.tracker();
    let view = state.services.event_detail_view(tracker.clone());
    let result = async {
        let mut detail = view.load(id).await?;
        if let SignupPanel::LoginRequired = detail.signup {
            bail!("The session ended before the signup could be made");
        }
        let outcome = view.join(&mut detail).await?;
        Ok::<_, anyhow::Error>((detail, outcome))
    }
    .await;
    tracker.teardown().await;

    let (detail, outcome) = result.with_context(|| format!("Failed to join event {}", id))?;

    if json {
        return print_json(&json!({
            "event_id": detail.event.id,
            "signed_up": outcome.is_signed_up(),
            "already_signed_up": outcome == JoinOutcome::AlreadySignedUp,
        }));
    }

    match outcome {
        JoinOutcome::AlreadySignedUp => {
            println!("You're already signed up for {}.", detail.event.title)
        }
        JoinOutcome::Joined { confirmed: true, .. } => {
            println!("Signed up for {}!", detail.event.title);
            println!("Add to calendar: {}", detail.calendar_link);
        }
        JoinOutcome::Joined { confirmed: false, .. } => {
            println!(
                "Signup sent for {}, but it is not visible yet. Check `hevents my-events` shortly.",
                detail.event.title
            );
        }
    }
    Ok(())
}

pub async fn my_events(state: &AppState, json: bool) -> Result<()> {
    let login = state.sign_in().await?;
    let events = state
        .services
        .signups()
        .joined_events(&login.identity.email)
        .await
        .context("Failed to load your events")?;

    if !json && events.is_empty() {
        println!("You haven't joined any events yet.");
        return Ok(());
    }
    print_events(&events, json)
}
