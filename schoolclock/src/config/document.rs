/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Serde view of the schedule document exactly as the authoring tool writes it.
//!
//! ```json
//! {
//!     "school_name": "Lincoln High",
//!     "school_start_time": "08:00",
//!     "school_end_time": "15:00",
//!     "has_homeroom": true,
//!     "days_per_cycle": 5,
//!     "class_duration": 45,
//!     "time_between_classes": 5,
//!     "homeroom_duration": 15,
//!     "homeroom_period_name": "Homeroom",
//!     "lunch": { "start_time": "12:00", "duration": 30 },
//!     "periods": [
//!         { "number": 1, "name": "Period 1", "duration": 45, "before_homeroom": false }
//!     ]
//! }
//! ```
//!
//! Numbers are kept signed and times kept as strings here so that range and
//! format problems surface as [`ValidationError`](super::ValidationError)s
//! with a field name, rather than as opaque deserializer errors.

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::timeline::clock::format_hhmm;

/// Top-level document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(alias = "schoolName")]
    pub school_name: String,

    #[serde(alias = "schoolStartTime")]
    pub school_start_time: String,

    #[serde(alias = "schoolEndTime")]
    pub school_end_time: String,

    #[serde(alias = "hasHomeroom")]
    pub has_homeroom: bool,

    #[serde(alias = "daysPerCycle")]
    pub days_per_cycle: i64,

    #[serde(alias = "classDurationMinutes")]
    pub class_duration: i64,

    #[serde(alias = "timeBetweenClassesMinutes")]
    pub time_between_classes: i64,

    /// Present iff `has_homeroom`.
    #[serde(
        default,
        alias = "homeroomDurationMinutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub homeroom_duration: Option<i64>,

    /// Present iff `has_homeroom`.
    #[serde(
        default,
        alias = "homeroomName",
        skip_serializing_if = "Option::is_none"
    )]
    pub homeroom_period_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<LunchEntry>,

    pub periods: Vec<PeriodEntry>,
}

/// `lunch` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunchEntry {
    #[serde(alias = "startTime")]
    pub start_time: String,

    #[serde(alias = "durationMinutes")]
    pub duration: i64,
}

/// One element of `periods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub number: i64,
    pub name: String,

    #[serde(alias = "durationMinutes")]
    pub duration: i64,

    /// Written by the authoring tool on period 1 only, and only with homeroom.
    #[serde(
        default,
        alias = "beforeHomeroom",
        skip_serializing_if = "Option::is_none"
    )]
    pub before_homeroom: Option<bool>,
}

impl From<&Schedule> for ScheduleDocument {
    fn from(s: &Schedule) -> Self {
        let homeroom = s.homeroom();
        Self {
            school_name: s.school_name().to_string(),
            school_start_time: format_hhmm(s.start()),
            school_end_time: format_hhmm(s.end()),
            has_homeroom: homeroom.is_some(),
            days_per_cycle: i64::from(s.days_per_cycle()),
            class_duration: i64::from(s.class_duration()),
            time_between_classes: i64::from(s.time_between_classes()),
            homeroom_duration: homeroom.map(|h| i64::from(h.duration_minutes)),
            homeroom_period_name: homeroom.map(|h| h.name.clone()),
            lunch: s.lunch().map(|l| LunchEntry {
                start_time: format_hhmm(l.start),
                duration: i64::from(l.duration_minutes),
            }),
            periods: s
                .periods()
                .iter()
                .enumerate()
                .map(|(i, p)| PeriodEntry {
                    number: p.number,
                    name: p.name.clone(),
                    duration: i64::from(p.duration_minutes),
                    // Mirrors the authoring tool: only period 1 with homeroom.
                    before_homeroom: (i == 0 && homeroom.is_some())
                        .then_some(p.before_homeroom),
                })
                .collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_document_uses_authoring_tool_keys() {
        let doc = ScheduleDocument::from(&Schedule::template());
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["school_start_time"], "08:00");
        assert_eq!(json["school_end_time"], "15:00");
        assert_eq!(json["has_homeroom"], true);
        assert_eq!(json["homeroom_duration"], 15);
        assert_eq!(json["homeroom_period_name"], "Homeroom");
        assert_eq!(json["lunch"]["start_time"], "12:00");
        assert_eq!(json["periods"][0]["before_homeroom"], false);
        assert!(
            json["periods"][1].get("before_homeroom").is_none(),
            "only period 1 carries before_homeroom"
        );
    }

    #[test]
    fn homeroom_fields_omitted_without_homeroom() {
        let mut s = Schedule::template();
        s.homeroom = None;
        let json = serde_json::to_value(ScheduleDocument::from(&s)).unwrap();

        assert_eq!(json["has_homeroom"], false);
        assert!(json.get("homeroom_duration").is_none());
        assert!(json.get("homeroom_period_name").is_none());
        assert!(json["periods"][0].get("before_homeroom").is_none());
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let json = r#"{
            "schoolName": "Aliased",
            "schoolStartTime": "09:00",
            "schoolEndTime": "12:00",
            "hasHomeroom": true,
            "homeroomDurationMinutes": 10,
            "homeroomName": "Advisory",
            "daysPerCycle": 6,
            "classDurationMinutes": 50,
            "timeBetweenClassesMinutes": 10,
            "lunch": { "startTime": "11:00", "durationMinutes": 20 },
            "periods": [
                { "number": 1, "name": "Math", "durationMinutes": 50, "beforeHomeroom": true }
            ]
        }"#;
        let doc: ScheduleDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.school_start_time, "09:00");
        assert_eq!(doc.homeroom_duration, Some(10));
        assert_eq!(doc.homeroom_period_name.as_deref(), Some("Advisory"));
        assert_eq!(doc.lunch.as_ref().unwrap().duration, 20);
        assert_eq!(doc.periods[0].before_homeroom, Some(true));
    }
}
