//! Period resolution: (schedule, instant) → which named period is "now".
//!
//! [`resolve`] is the whole engine.  It is a pure function: no I/O, no shared
//! state, no failure modes once a [`Schedule`] has been validated.
//! [`PeriodResolver`] is the same thing with the [`Timeline`] built once up
//! front, for callers that resolve repeatedly (the display loop).
//!
//! # Rules
//! 1. `now < start` → [`ResolvedPeriod::NotStarted`];
//!    `now > end` → [`ResolvedPeriod::Over`].  The end instant itself is
//!    still a school-day instant.
//! 2. Otherwise, `elapsed = now - start` (fractional minutes) is looked up in
//!    the timeline; a containing block yields its name.
//! 3. Anything else inside the day is [`ResolvedPeriod::Passing`].
//!
//! A block that runs past the school end still resolves by name up to and
//! including the end instant.  Lunch never produces its own label.
//!
//! # Example
//! ```rust,ignore
//! let schedule = ScheduleLoader::load_from_file(Path::new("school_schedule.json"))?;
//! let resolver = PeriodResolver::new(schedule);
//! println!("{}", resolver.resolve(Local::now().time()));
//! ```

pub mod coverage;

pub use coverage::{check_coverage, CoverageIssue, CoverageReport};

use chrono::NaiveTime;

use crate::schedule::Schedule;
use crate::timeline::clock::minutes_since;
use crate::timeline::{BlockKind, Timeline};

// ── Labels ────────────────────────────────────────────────────────────────────

pub const PASSING_PERIOD: &str = "Passing period";
pub const NOT_STARTED: &str = "School hasn't started yet";
pub const SCHOOL_OVER: &str = "School is over";

// ── ResolvedPeriod ────────────────────────────────────────────────────────────

/// Result of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPeriod {
    /// Inside the homeroom block.
    Homeroom(String),
    /// Inside a class period.
    Class { number: i64, name: String },
    /// Inside the school day but in no block.
    Passing,
    /// Strictly before the school start.
    NotStarted,
    /// Strictly after the school end.
    Over,
}

impl ResolvedPeriod {
    /// The text shown to the user.
    pub fn label(&self) -> &str {
        match self {
            ResolvedPeriod::Homeroom(name) | ResolvedPeriod::Class { name, .. } => name,
            ResolvedPeriod::Passing => PASSING_PERIOD,
            ResolvedPeriod::NotStarted => NOT_STARTED,
            ResolvedPeriod::Over => SCHOOL_OVER,
        }
    }

    /// `true` for the two out-of-hours sentinels.
    pub fn is_outside_school_day(&self) -> bool {
        matches!(self, ResolvedPeriod::NotStarted | ResolvedPeriod::Over)
    }
}

impl std::fmt::Display for ResolvedPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&BlockKind> for ResolvedPeriod {
    fn from(kind: &BlockKind) -> Self {
        match kind {
            BlockKind::Homeroom { name } => ResolvedPeriod::Homeroom(name.clone()),
            BlockKind::Class { number, name } => ResolvedPeriod::Class {
                number: *number,
                name: name.clone(),
            },
        }
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Resolve `now` against `schedule`.
///
/// Builds the timeline on every call; use [`PeriodResolver`] to reuse it.
pub fn resolve(schedule: &Schedule, now: NaiveTime) -> ResolvedPeriod {
    resolve_in(schedule, &Timeline::build(schedule), now)
}

fn resolve_in(schedule: &Schedule, timeline: &Timeline, now: NaiveTime) -> ResolvedPeriod {
    if now < schedule.start() {
        return ResolvedPeriod::NotStarted;
    }
    if now > schedule.end() {
        return ResolvedPeriod::Over;
    }

    let elapsed = minutes_since(schedule.start(), now);
    timeline
        .block_at(elapsed)
        .map(|b| ResolvedPeriod::from(&b.kind))
        .unwrap_or(ResolvedPeriod::Passing)
}

/// A schedule together with its precomputed timeline.
///
/// Immutable after construction, so it is `Send + Sync` and can be shared
/// across threads behind an `Arc` with no locking.
#[derive(Debug, Clone)]
pub struct PeriodResolver {
    schedule: Schedule,
    timeline: Timeline,
}

impl PeriodResolver {
    pub fn new(schedule: Schedule) -> Self {
        let timeline = Timeline::build(&schedule);
        Self { schedule, timeline }
    }

    /// Same result as [`resolve`] for this resolver's schedule.
    pub fn resolve(&self, now: NaiveTime) -> ResolvedPeriod {
        resolve_in(&self.schedule, &self.timeline, now)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Diagnostics for this schedule; see [`check_coverage`].
    pub fn coverage(&self) -> CoverageReport {
        check_coverage(&self.schedule, &self.timeline)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
