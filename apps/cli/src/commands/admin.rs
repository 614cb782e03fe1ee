//! Staff commands. Every subcommand signs in, runs the route guard, and
//! works through the admin dashboard.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use hevents_core::application::ACCESS_DENIED_NOTICE;
use hevents_core::{AdminDashboard, EventId, GuardState, LoadState};
use tracing::info;

use super::{event_line, print_events, print_json};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List events as the dashboard sees them
    List,
    /// Create an event; all seven fields are required
    Create(EventFieldArgs),
    /// Update an event; omitted fields keep their current value
    Update {
        id: String,
        #[command(flatten)]
        fields: EventFieldArgs,
    },
    /// Delete an event
    Delete { id: String },
}

#[derive(Debug, Default, Args)]
pub struct EventFieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// HH:MM
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
}

impl EventFieldArgs {
    /// Provided values keyed by form field name
    fn values(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
            ("image_url", &self.image_url),
            ("category", &self.category),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }

    fn apply(&self, dashboard: &mut AdminDashboard) -> Result<()> {
        for (name, value) in self.values() {
            dashboard.form_mut().set(name, value)?;
        }
        Ok(())
    }
}

/// Sign in, run the guard, and load the dashboard's event list
async fn open_dashboard(state: &AppState) -> Result<AdminDashboard> {
    state.sign_in().await?;

    let tracker = state.services.tracker();
    let mut guard = state.services.route_guard(tracker.clone());
    let decision = guard.evaluate().await;
    tracker.teardown().await;

    match &decision.state {
        GuardState::Authorized(identity) => {
            info!(email = %identity.email, "[admin] Dashboard opened");
        }
        GuardState::Denied(identity) => {
            let notice = decision.notice.as_deref().unwrap_or(ACCESS_DENIED_NOTICE);
            bail!("{}: {} is not staff", notice, identity.email);
        }
        GuardState::Anonymous | GuardState::Pending => {
            bail!("Sign in with a staff account to manage events");
        }
    }

    let mut dashboard = state.services.admin_dashboard(&decision)?;
    if let LoadState::Failed(reason) = dashboard.load().await {
        return Err(anyhow!("Failed to load events: {}", reason));
    }
    Ok(dashboard)
}

pub async fn run(state: &AppState, command: AdminCommand, json: bool) -> Result<()> {
    let mut dashboard = open_dashboard(state).await?;

    match command {
        AdminCommand::List => print_events(dashboard.events(), json),
        AdminCommand::Create(fields) => {
            fields.apply(&mut dashboard)?;
            let event = dashboard.submit().await.context("Failed to create event")?;
            if json {
                return print_json(&event);
            }
            println!("Event created!");
            println!("{}", event_line(&event));
            Ok(())
        }
        AdminCommand::Update { id, fields } => {
            let id = EventId::new(id);
            dashboard.begin_edit(&id)?;
            fields.apply(&mut dashboard)?;
            let event = dashboard
                .submit()
                .await
                .with_context(|| format!("Failed to update event {}", id))?;
            if json {
                return print_json(&event);
            }
            println!("Event updated!");
            println!("{}", event_line(&event));
            Ok(())
        }
        AdminCommand::Delete { id } => {
            let id = EventId::new(id);
            dashboard
                .delete(&id)
                .await
                .with_context(|| format!("Failed to delete event {}", id))?;
            if json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Event {} deleted.", id);
            Ok(())
        }
    }
}
