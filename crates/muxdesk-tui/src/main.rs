//! `muxdesk` — terminal portal for telecom circuit records.
//!
//! Look up, view, edit, and register circuit records (IDs, IP
//! configuration, bandwidth, mux/port assignments) over an in-memory demo
//! dataset, behind a demo sign-in gate. There is no backend: every portal
//! call sleeps for a configured latency and works against local state.
//!
//! Logs are written to a file (default `/tmp/muxdesk.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, config
//! load, portal construction, and app launch.

mod action;
mod app;
mod component;
mod config;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use muxdesk_core::Portal;

use crate::app::App;

/// Terminal portal for telecom circuit records.
#[derive(Parser, Debug)]
#[command(name = "muxdesk", version, about)]
struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(short = 'c', long, env = "MUXDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Simulated backend latency in milliseconds (overrides config)
    #[arg(long, env = "MUXDESK_LATENCY_MS")]
    latency_ms: Option<u64>,

    /// Log file path (defaults to /tmp/muxdesk.log)
    #[arg(long, default_value = "/tmp/muxdesk.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr -- that
/// would corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application so logs are flushed on exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("muxdesk={log_level},muxdesk_core={log_level}"))
    });

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("muxdesk.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file -- hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_config()?,
    };

    let latency = match cli.latency_ms {
        Some(ms) => Duration::from_millis(ms),
        None => config.latency(),
    };

    info!(
        latency_ms = cli.latency_ms.unwrap_or(config.portal.latency_ms),
        notice_ms = config.portal.notice_ms,
        "starting muxdesk"
    );

    let portal = Portal::with_demo_records(config.gate_credentials(), latency);
    let mut app = App::new(&portal, config.notice_duration());
    app.run().await?;

    Ok(())
}
