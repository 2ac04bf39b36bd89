/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveTime};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use schoolclock::config::{DocumentFormat, ScheduleDocument, DEFAULT_SCHEDULE_PATH};
use schoolclock::resolver::PASSING_PERIOD;
use schoolclock::timeline::clock::{format_hhmm, parse_hhmm, truncate_to_minute};
use schoolclock::{ConfigError, PeriodResolver, Schedule, ScheduleLoader};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Resolve the current school period from a schedule document.
///
/// Example:
///   schoolclock --schedule school_schedule.json at 10:15
#[derive(Debug, Parser)]
#[command(
    name = "schoolclock",
    about = "School period resolver",
    long_about = None,
)]
struct Cli {
    /// Path to the schedule document (JSON, or YAML by extension).
    #[arg(short = 's', long = "schedule", default_value = DEFAULT_SCHEDULE_PATH)]
    schedule: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the period for the current local time.
    Now,

    /// Print the period at a given HH:MM.
    At {
        #[arg(value_parser = parse_instant)]
        time: NaiveTime,
    },

    /// List every block and passing gap of the day.
    Timeline,

    /// Validate the schedule document and report coverage diagnostics.
    Validate,

    /// Write the default schedule document (stdout unless --output is given).
    Template {
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

fn parse_instant(s: &str) -> Result<NaiveTime, String> {
    parse_hhmm(s).ok_or_else(|| format!("'{s}' is not a 24-hour HH:MM time"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr; stdout carries only the command's result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ConfigError>() {
            Some(ConfigError::Missing { path }) => {
                error!("No schedule document at {}", path.display());
                eprintln!(
                    "Error: {} not found. Create one first, e.g.\n  schoolclock template --output {}",
                    path.display(),
                    DEFAULT_SCHEDULE_PATH,
                );
            }
            _ => {
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
            }
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Command::Template { output } => return write_template(output.as_deref()),
        other => other,
    };

    let schedule = ScheduleLoader::load_from_file(&cli.schedule)?;
    let resolver = PeriodResolver::new(schedule);

    match command {
        Command::Now => {
            // Minute resolution, like the display.
            let now = truncate_to_minute(Local::now().time());
            info!(now = %format_hhmm(now), "Resolving current time");
            println!("{}", resolver.resolve(now));
        }
        Command::At { time } => println!("{}", resolver.resolve(time)),
        Command::Timeline => print_timeline(&resolver),
        Command::Validate => {
            let report = resolver.coverage();
            report.log();
            println!(
                "{}: valid ({} block(s), {} min day)",
                cli.schedule.display(),
                resolver.timeline().blocks().len(),
                resolver.timeline().day_length_minutes(),
            );
            for issue in &report.issues {
                println!("  warning: {issue}");
            }
        }
        Command::Template { .. } => {}
    }
    Ok(())
}

fn write_template(output: Option<&std::path::Path>) -> Result<()> {
    let schedule = Schedule::template();
    match output {
        Some(path) => ScheduleLoader::save_to_file(&schedule, path)
            .with_context(|| format!("Failed to write template to {}", path.display())),
        None => {
            let body = DocumentFormat::Json
                .render(&ScheduleDocument::from(&schedule))
                .map_err(|e| anyhow!(e))?;
            println!("{body}");
            Ok(())
        }
    }
}

fn print_timeline(resolver: &PeriodResolver) {
    let timeline = resolver.timeline();
    let at = |minute: u32| {
        timeline
            .time_at(minute)
            .map(format_hhmm)
            .unwrap_or_else(|| String::from("--:--"))
    };

    let mut rows: Vec<(u32, u32, String)> = timeline
        .blocks()
        .iter()
        .map(|b| (b.start_minute, b.end_minute, b.kind.name().to_string()))
        .chain(
            timeline
                .gaps()
                .into_iter()
                .map(|g| (g.start_minute, g.end_minute, String::from(PASSING_PERIOD))),
        )
        .collect();
    rows.sort_by_key(|(start, end, _)| (*start, *end));

    println!(
        "{} {}–{}",
        resolver.schedule().school_name(),
        format_hhmm(resolver.schedule().start()),
        format_hhmm(resolver.schedule().end()),
    );
    for (start, end, label) in rows {
        println!("  {}–{}  {}", at(start), at(end), label);
    }
}
