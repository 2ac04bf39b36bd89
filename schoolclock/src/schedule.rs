/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Validated school-day schedule.
//!
//! Two distinct types model the two sides of loading:
//!
//! ```text
//! school_schedule.json ──(serde)──► ScheduleDocument ──(validate)──► Schedule
//!                                    ↑ raw, as written                 ↑ typed, immutable
//!                                    strings / signed ints             NaiveTime / u32
//! ```
//!
//! A [`Schedule`] can only be obtained through validation
//! (`Schedule::try_from(document)`) or [`Schedule::template`], so the
//! resolution engine never has to defend against a malformed day.

use chrono::NaiveTime;

use crate::timeline::clock::whole_minutes_between;

// ── Blocks ────────────────────────────────────────────────────────────────────

/// Homeroom block.  Always the first block of the day when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homeroom {
    /// Label shown while homeroom is in session (e.g. `"Homeroom"`, `"Advisory"`).
    pub name: String,
    pub duration_minutes: u32,
}

/// Lunch window.
///
/// Carried so the document round-trips, but **inert**: the resolver never
/// consults it.  Lunch time resolves to whichever block or gap it overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lunch {
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

/// One class period, in timeline order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    /// 1-based number assigned by the authoring tool.
    pub number: i64,
    pub name: String,
    pub duration_minutes: u32,
    /// Authoring-tool answer to "is this period before homeroom?".
    ///
    /// Only meaningful on the first period of a day with homeroom, and even
    /// then **inert**: homeroom always comes first in the timeline.
    pub before_homeroom: bool,
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// A school day's timeline definition, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub(crate) school_name: String,
    pub(crate) start: NaiveTime,
    pub(crate) end: NaiveTime,
    pub(crate) homeroom: Option<Homeroom>,
    pub(crate) time_between_classes: u32,
    pub(crate) lunch: Option<Lunch>,
    pub(crate) periods: Vec<Period>,
    pub(crate) days_per_cycle: u8,
    pub(crate) class_duration: u32,
}

impl Schedule {
    /// The authoring tool's default day: 08:00–15:00, 15-minute homeroom,
    /// eight 45-minute periods, 5 minutes passing, lunch at 12:00.
    pub fn template() -> Self {
        let class_duration = 45;
        let periods = (1..=8)
            .map(|n| Period {
                number: n,
                name: format!("Period {n}"),
                duration_minutes: class_duration,
                before_homeroom: false,
            })
            .collect();

        Self {
            school_name: String::new(),
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN),
            homeroom: Some(Homeroom {
                name: String::from("Homeroom"),
                duration_minutes: 15,
            }),
            time_between_classes: 5,
            lunch: Some(Lunch {
                start: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
                duration_minutes: 30,
            }),
            periods,
            days_per_cycle: 5,
            class_duration,
        }
    }

    /// [`Schedule::template`] with a school name filled in.
    pub fn template_named(school_name: impl Into<String>) -> Self {
        Self {
            school_name: school_name.into(),
            ..Self::template()
        }
    }

    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    /// First instant of the school day.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Last instant of the school day (inclusive – "over" only strictly after).
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn homeroom(&self) -> Option<&Homeroom> {
        self.homeroom.as_ref()
    }

    /// Gap inserted after every block (homeroom and each period).
    pub fn time_between_classes(&self) -> u32 {
        self.time_between_classes
    }

    /// Inert – see [`Lunch`].
    pub fn lunch(&self) -> Option<&Lunch> {
        self.lunch.as_ref()
    }

    /// Periods in timeline order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Authoring convenience only; not consumed by resolution.
    pub fn days_per_cycle(&self) -> u8 {
        self.days_per_cycle
    }

    /// Authoring convenience only; not consumed by resolution.
    pub fn class_duration(&self) -> u32 {
        self.class_duration
    }

    /// `end - start` in whole minutes.
    pub fn day_length_minutes(&self) -> u32 {
        whole_minutes_between(self.start, self.end)
    }

    /// `true` when the first period is flagged as preceding homeroom.
    ///
    /// The flag has no effect on resolution; this exists so callers can
    /// surface it as a diagnostic.
    pub fn first_period_before_homeroom(&self) -> bool {
        self.homeroom.is_some() && self.periods.first().is_some_and(|p| p.before_homeroom)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
