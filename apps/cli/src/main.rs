//! hevents command-line client
//!
//! Browse community events, join them, and manage them as staff.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hevents_core::{ClientConfig, EventId};
use tracing::error;

mod commands;
mod logging;
mod notices;
mod state;

use state::{AppState, Credentials};

#[derive(Debug, Parser)]
#[command(name = "hevents", version, about = "Community events from the command line")]
struct Cli {
    #[command(flatten)]
    credentials: CredentialArgs,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on the console (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct CredentialArgs {
    /// Account email
    #[arg(long, env = "HEVENTS_EMAIL", global = true)]
    email: Option<String>,

    /// Account password
    #[arg(long, env = "HEVENTS_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse events
    #[command(subcommand)]
    Events(EventsCommand),
    /// Sign up for an event (requires credentials)
    Join {
        /// Event id
        id: String,
    },
    /// List the events you joined, soonest first (requires credentials)
    MyEvents,
    /// Staff-only event management
    #[command(subcommand)]
    Admin(commands::admin::AdminCommand),
    /// Send a password-reset email
    ResetPassword {
        email: String,
    },
    /// Change the password of the signed-in account (requires credentials)
    SetPassword {
        #[arg(long, env = "HEVENTS_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}

#[derive(Debug, Subcommand)]
enum EventsCommand {
    /// List events, optionally filtered
    List {
        /// Case-insensitive match on title or location
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one event with related events and a calendar link
    Show {
        id: String,
    },
    /// List the categories in use
    Categories,
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::load()?;
    let state = AppState::new(
        config,
        Credentials {
            email: cli.credentials.email,
            password: cli.credentials.password,
        },
    )?;
    let json = cli.json;
    let mut notices = state.services.subscribe();

    let result = match cli.command {
        Command::Events(EventsCommand::List { search, category }) => {
            commands::events::list(&state, &search, category, json).await
        }
        Command::Events(EventsCommand::Show { id }) => {
            commands::events::show(&state, &EventId::new(id), json).await
        }
        Command::Events(EventsCommand::Categories) => {
            commands::events::categories(&state, json).await
        }
        Command::Join { id } => commands::signup::join(&state, &EventId::new(id), json).await,
        Command::MyEvents => commands::signup::my_events(&state, json).await,
        Command::Admin(command) => commands::admin::run(&state, command, json).await,
        Command::ResetPassword { email } => commands::account::reset_password(&state, &email).await,
        Command::SetPassword { new_password } => {
            commands::account::set_password(&state, &new_password).await
        }
    };

    if !json {
        notices::print_notices(&mut notices);
    }
    result
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _guard = logging::init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!(error = %format!("{:#}", e), "[hevents] Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
