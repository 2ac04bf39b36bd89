/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Post-load schedule diagnostics.
//!
//! # Status: warning only
//!
//! Nothing here rejects a schedule.  Resolution deliberately ignores the
//! `lunch` window and the `before_homeroom` flag, and tolerates blocks that
//! do not fit in the school day; this module puts those situations in front
//! of the operator so a surprising label ("Passing period" at lunch time,
//! homeroom shown before an early period) can be traced back to the
//! document.
//!
//! | Issue | Effect on resolution |
//! |---|---|
//! | `BlockOverrunsEnd` | block still named up to the end instant, then "School is over" |
//! | `BlockAfterEnd` | block never shown |
//! | `UnscheduledTail` | last gap before the end shows "Passing period" |
//! | `LunchIgnored` | lunch window shows whatever block or gap it overlaps |
//! | `BeforeHomeroomIgnored` | homeroom is still resolved first |

use tracing::warn;

use crate::schedule::Schedule;
use crate::timeline::clock::format_hhmm;
use crate::timeline::Timeline;

// ── Public API ────────────────────────────────────────────────────────────────

/// One diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageIssue {
    /// Block starts inside the day but ends after the school end.
    BlockOverrunsEnd { name: String, overrun_minutes: u32 },

    /// Block starts at or after the school end.
    BlockAfterEnd { name: String },

    /// Time between the last block and the school end that no block covers.
    UnscheduledTail { minutes: u32 },

    /// The document has a lunch window; it never produces its own label.
    LunchIgnored {
        start: String,
        duration_minutes: u32,
        overlaps: Vec<String>,
    },

    /// Period 1 is flagged as preceding homeroom; homeroom still comes first.
    BeforeHomeroomIgnored { period: String },
}

impl std::fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageIssue::BlockOverrunsEnd {
                name,
                overrun_minutes,
            } => write!(
                f,
                "'{name}' runs {overrun_minutes} min past the end of the school day"
            ),

            CoverageIssue::BlockAfterEnd { name } => {
                write!(f, "'{name}' starts after the school day ends and is never shown")
            }

            CoverageIssue::UnscheduledTail { minutes } => write!(
                f,
                "last {minutes} min of the school day are not covered by any period"
            ),

            CoverageIssue::LunchIgnored {
                start,
                duration_minutes,
                overlaps,
            } => {
                write!(
                    f,
                    "lunch at {start} ({duration_minutes} min) is not used for resolution"
                )?;
                if !overlaps.is_empty() {
                    write!(f, "; it overlaps {}", overlaps.join(", "))?;
                }
                Ok(())
            }

            CoverageIssue::BeforeHomeroomIgnored { period } => write!(
                f,
                "'{period}' is marked before homeroom, but homeroom is always resolved first"
            ),
        }
    }
}

/// All diagnostics for one schedule, in timeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub issues: Vec<CoverageIssue>,
}

impl CoverageReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Emit one `warn!` per issue.
    pub fn log(&self) {
        for issue in &self.issues {
            warn!("{issue}");
        }
    }
}

/// Compare `timeline` against `schedule`'s day bounds and inert fields.
pub fn check_coverage(schedule: &Schedule, timeline: &Timeline) -> CoverageReport {
    let day = timeline.day_length_minutes();
    let mut issues = Vec::new();

    for b in timeline.blocks() {
        if b.start_minute >= day {
            issues.push(CoverageIssue::BlockAfterEnd {
                name: b.kind.name().to_string(),
            });
        } else if b.end_minute > day {
            issues.push(CoverageIssue::BlockOverrunsEnd {
                name: b.kind.name().to_string(),
                overrun_minutes: b.end_minute - day,
            });
        }
    }

    let covered_until = timeline
        .blocks()
        .iter()
        .map(|b| b.end_minute)
        .max()
        .unwrap_or(0);
    if covered_until < day {
        issues.push(CoverageIssue::UnscheduledTail {
            minutes: day - covered_until,
        });
    }

    if let Some(lunch) = schedule.lunch() {
        let lunch_start = lunch
            .start
            .signed_duration_since(schedule.start())
            .num_minutes();
        let lunch_end = lunch_start + i64::from(lunch.duration_minutes);
        let overlaps = timeline
            .blocks()
            .iter()
            .filter(|b| i64::from(b.start_minute) < lunch_end && lunch_start < i64::from(b.end_minute))
            .map(|b| b.kind.name().to_string())
            .collect();
        issues.push(CoverageIssue::LunchIgnored {
            start: format_hhmm(lunch.start),
            duration_minutes: lunch.duration_minutes,
            overlaps,
        });
    }

    if schedule.first_period_before_homeroom() {
        if let Some(p) = schedule.periods().first() {
            issues.push(CoverageIssue::BeforeHomeroomIgnored {
                period: p.name.clone(),
            });
        }
    }

    CoverageReport { issues }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
