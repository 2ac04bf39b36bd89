use std::io::Stdout;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::Parser;
use tracing::{error, info, warn};

use schoolclock::config::DEFAULT_SCHEDULE_PATH;
use schoolclock::timeline::clock::parse_hhmm;
use schoolclock::{ConfigError, PeriodResolver, ScheduleLoader};

mod clock;
mod display;
mod presenter;

use clock::{Clock, FixedClock, SystemClock};
use display::TerminalScreen;
use presenter::{Presenter, DEFAULT_REFRESH};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Paint the current school period on a (virtual) display.
///
/// Example:
///   schoolclock-display --schedule school_schedule.json --interval-secs 30
#[derive(Debug, Parser)]
#[command(
    name = "schoolclock-display",
    about = "School period display loop",
    long_about = None,
)]
struct Cli {
    /// Path to the schedule document.
    #[arg(short = 's', long = "schedule", default_value = DEFAULT_SCHEDULE_PATH)]
    schedule: PathBuf,

    /// Seconds between refreshes.
    #[arg(short = 'i', long = "interval-secs", default_value_t = DEFAULT_REFRESH.as_secs())]
    interval_secs: u64,

    /// Display width in character cells.
    #[arg(long = "width", default_value_t = 32)]
    width: u16,

    /// Display height in character cells.
    #[arg(long = "height", default_value_t = 8)]
    height: u16,

    /// Pin the clock to HH:MM instead of reading the wall clock.
    #[arg(long = "at", value_parser = parse_instant)]
    at: Option<NaiveTime>,
}

fn parse_instant(s: &str) -> Result<NaiveTime, String> {
    parse_hhmm(s).ok_or_else(|| format!("'{s}' is not a 24-hour HH:MM time"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // stdout is the screen, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        schedule = %cli.schedule.display(),
        interval_secs = cli.interval_secs,
        width = cli.width,
        height = cli.height,
        at = ?cli.at,
        "Configuration"
    );

    // ── Load schedule ─────────────────────────────────────────────────────────
    let schedule = match ScheduleLoader::load_from_file(&cli.schedule) {
        Ok(s) => s,
        Err(ConfigError::Missing { path }) => {
            error!(
                "{} not found. Please create a schedule first (schoolclock template --output {}).",
                path.display(),
                DEFAULT_SCHEDULE_PATH,
            );
            process::exit(1);
        }
        Err(e) => {
            error!("Failed to load schedule: {:#}", e);
            process::exit(1);
        }
    };

    let resolver = Arc::new(PeriodResolver::new(schedule));
    resolver.coverage().log();

    // ── Run ───────────────────────────────────────────────────────────────────
    let result = match cli.at {
        Some(t) => run(&cli, resolver, FixedClock(t)).await,
        None => run(&cli, resolver, SystemClock).await,
    };
    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run<C: Clock>(cli: &Cli, resolver: Arc<PeriodResolver>, clock: C) -> Result<()> {
    let screen: TerminalScreen<Stdout> =
        TerminalScreen::new(std::io::stdout(), cli.width, cli.height)
            .context("Failed to initialise display")?;

    let every = Duration::from_secs(cli.interval_secs.max(1));
    Presenter::new(resolver, screen, clock)
        .run(every, shutdown_signal())
        .await
        .context("Display loop failed")
}

/// Resolves on Ctrl-C.  If the handler cannot be installed the loop runs
/// until killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
