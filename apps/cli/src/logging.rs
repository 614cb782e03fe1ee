//! Tracing setup for the CLI: console on stderr plus a daily log file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_PREFIX: &str = "hevents";

/// Default filter when RUST_LOG is not set
const DEFAULT_FILTER: &str = "info,hevents_core=debug,hevents_remote=debug,hevents_cli=debug";

/// Get the app local data directory
///
/// - Linux: ~/.local/share/hevents/
/// - macOS: ~/Library/Application Support/hevents/
/// - Windows: %LOCALAPPDATA%/hevents/
pub fn app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hevents")
}

pub fn logs_dir() -> PathBuf {
    app_data_dir().join("logs")
}

/// Initialize tracing with console and file logging.
///
/// `verbose` raises the console default to debug when RUST_LOG is unset.
/// The returned guard must live until exit or buffered file lines are lost;
/// it is `None` when the log file could not be opened.
pub fn init_tracing(verbose: bool) -> Option<WorkerGuard> {
    let logs_dir = logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
    }

    // Creates files like: hevents.2026-01-22.log
    let (file_writer, guard) = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&logs_dir)
    {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: Failed to create log file appender: {}", e);
            (None, None)
        }
    };

    // Crate names use underscores in tracing targets (hevents-core → hevents_core)
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(verbose);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
