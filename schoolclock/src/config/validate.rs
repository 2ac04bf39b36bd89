/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule document validation: [`ScheduleDocument`] → [`Schedule`].
//!
//! All rules are checked and every violation is collected, so an operator
//! fixing a hand-edited file sees the whole list in one run.  The ranges
//! are the ones the authoring tool's prompts enforce.

use std::ops::RangeInclusive;

use chrono::NaiveTime;
use tracing::warn;

use super::document::{LunchEntry, ScheduleDocument};
use super::error::{ConfigError, ValidationError};
use crate::schedule::{Homeroom, Lunch, Period, Schedule};
use crate::timeline::clock::{format_hhmm, parse_hhmm};

// ── Permitted ranges ──────────────────────────────────────────────────────────

const DAYS_PER_CYCLE: RangeInclusive<i64> = 1..=10;
const CLASS_DURATION: RangeInclusive<i64> = 10..=120;
const TIME_BETWEEN_CLASSES: RangeInclusive<i64> = 0..=30;
const HOMEROOM_DURATION: RangeInclusive<i64> = 1..=u32::MAX as i64;
const LUNCH_DURATION: RangeInclusive<i64> = 10..=120;

// ── Collector ─────────────────────────────────────────────────────────────────

/// Accumulates violations while the document is walked once.
#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn time(&mut self, field: &'static str, value: &str) -> Option<NaiveTime> {
        let parsed = parse_hhmm(value);
        if parsed.is_none() {
            self.errors.push(ValidationError::BadTimeFormat {
                field,
                value: value.to_string(),
            });
        }
        parsed
    }

    fn ranged(&mut self, field: &str, value: i64, range: RangeInclusive<i64>) -> Option<u32> {
        if range.contains(&value) {
            u32::try_from(value).ok()
        } else {
            self.errors.push(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min: *range.start(),
                max: *range.end(),
            });
            None
        }
    }

    fn duration(&mut self, field: String, value: i64) -> Option<u32> {
        match u32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) if value < 0 => {
                self.errors
                    .push(ValidationError::NegativeDuration { field, value });
                None
            }
            Err(_) => {
                self.errors.push(ValidationError::OutOfRange {
                    field,
                    value,
                    min: 0,
                    max: i64::from(u32::MAX),
                });
                None
            }
        }
    }

    /// Blank names are legal but show as an empty label.
    fn name(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            warn!("{field} is blank; the display will show an empty label");
        }
    }

    fn lunch(&mut self, entry: &LunchEntry) -> Option<Lunch> {
        let start = self.time("lunch.start_time", &entry.start_time);
        let duration = self.ranged("lunch.duration", entry.duration, LUNCH_DURATION);
        Some(Lunch {
            start: start?,
            duration_minutes: duration?,
        })
    }

    fn homeroom(&mut self, doc: &ScheduleDocument) -> Option<Homeroom> {
        if !doc.has_homeroom {
            if doc.homeroom_duration.is_some() {
                self.errors.push(ValidationError::UnexpectedHomeroomField {
                    field: "homeroom_duration",
                });
            }
            if doc.homeroom_period_name.is_some() {
                self.errors.push(ValidationError::UnexpectedHomeroomField {
                    field: "homeroom_period_name",
                });
            }
            return None;
        }

        let duration = match doc.homeroom_duration {
            Some(d) => self.ranged("homeroom_duration", d, HOMEROOM_DURATION),
            None => {
                self.errors.push(ValidationError::MissingHomeroomField {
                    field: "homeroom_duration",
                });
                None
            }
        };
        let name = match &doc.homeroom_period_name {
            Some(n) => {
                self.name("homeroom_period_name", n);
                Some(n.clone())
            }
            None => {
                self.errors.push(ValidationError::MissingHomeroomField {
                    field: "homeroom_period_name",
                });
                None
            }
        };

        Some(Homeroom {
            name: name?,
            duration_minutes: duration?,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Check every rule and build a [`Schedule`], or return all violations.
pub fn validate(doc: &ScheduleDocument) -> Result<Schedule, Vec<ValidationError>> {
    let mut c = Checker::default();

    let start = c.time("school_start_time", &doc.school_start_time);
    let end = c.time("school_end_time", &doc.school_end_time);
    if let (Some(s), Some(e)) = (start, end) {
        if s >= e {
            c.errors.push(ValidationError::NonChronological {
                start: format_hhmm(s),
                end: format_hhmm(e),
            });
        }
    }

    let days_per_cycle = c.ranged("days_per_cycle", doc.days_per_cycle, DAYS_PER_CYCLE);
    let class_duration = c.ranged("class_duration", doc.class_duration, CLASS_DURATION);
    let gap = c.ranged(
        "time_between_classes",
        doc.time_between_classes,
        TIME_BETWEEN_CLASSES,
    );

    let homeroom = c.homeroom(doc);
    let lunch = doc.lunch.as_ref().map(|l| c.lunch(l));

    let periods: Vec<Option<Period>> = doc
        .periods
        .iter()
        .enumerate()
        .map(|(i, p)| {
            c.name(&format!("periods[{i}].name"), &p.name);
            let duration = c.duration(format!("periods[{i}].duration"), p.duration);
            Some(Period {
                number: p.number,
                name: p.name.clone(),
                duration_minutes: duration?,
                before_homeroom: p.before_homeroom.unwrap_or(false),
            })
        })
        .collect();

    if !c.errors.is_empty() {
        return Err(c.errors);
    }

    // No violations recorded means every `Option` above is populated.
    let missing = || vec![];
    Ok(Schedule {
        school_name: doc.school_name.clone(),
        start: start.ok_or_else(missing)?,
        end: end.ok_or_else(missing)?,
        homeroom,
        time_between_classes: gap.ok_or_else(missing)?,
        lunch: lunch.flatten(),
        periods: periods
            .into_iter()
            .collect::<Option<Vec<Period>>>()
            .ok_or_else(missing)?,
        days_per_cycle: days_per_cycle
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(missing)?,
        class_duration: class_duration.ok_or_else(missing)?,
    })
}

impl TryFrom<ScheduleDocument> for Schedule {
    type Error = ConfigError;

    fn try_from(doc: ScheduleDocument) -> Result<Self, Self::Error> {
        validate(&doc).map_err(ConfigError::Invalid)
    }
}

impl TryFrom<&ScheduleDocument> for Schedule {
    type Error = ConfigError;

    fn try_from(doc: &ScheduleDocument) -> Result<Self, Self::Error> {
        validate(doc).map_err(ConfigError::Invalid)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::document::PeriodEntry;

    /// Minimal valid document without homeroom or lunch.
    fn base_doc() -> ScheduleDocument {
        ScheduleDocument {
            school_name: "Test School".into(),
            school_start_time: "08:00".into(),
            school_end_time: "15:00".into(),
            has_homeroom: false,
            days_per_cycle: 5,
            class_duration: 45,
            time_between_classes: 5,
            homeroom_duration: None,
            homeroom_period_name: None,
            lunch: None,
            periods: vec![PeriodEntry {
                number: 1,
                name: "Period 1".into(),
                duration: 45,
                before_homeroom: None,
            }],
        }
    }

    fn errors_of(doc: &ScheduleDocument) -> Vec<ValidationError> {
        validate(doc).expect_err("document should be rejected")
    }

    // ── accepted documents ────────────────────────────────────────────────────

    #[test]
    fn minimal_document_is_accepted() {
        let s = validate(&base_doc()).unwrap();
        assert_eq!(s.school_name(), "Test School");
        assert_eq!(s.start(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert!(s.homeroom().is_none());
        assert!(s.lunch().is_none());
        assert_eq!(s.periods().len(), 1);
        assert_eq!(s.periods()[0].duration_minutes, 45);
    }

    #[test]
    fn homeroom_and_lunch_are_carried_through() {
        let mut doc = base_doc();
        doc.has_homeroom = true;
        doc.homeroom_duration = Some(15);
        doc.homeroom_period_name = Some("Advisory".into());
        doc.lunch = Some(LunchEntry {
            start_time: "12:00".into(),
            duration: 30,
        });
        doc.periods[0].before_homeroom = Some(true);

        let s = Schedule::try_from(doc).unwrap();
        let hr = s.homeroom().unwrap();
        assert_eq!(hr.name, "Advisory");
        assert_eq!(hr.duration_minutes, 15);
        assert_eq!(s.lunch().unwrap().duration_minutes, 30);
        assert!(s.periods()[0].before_homeroom);
    }

    #[test]
    fn empty_period_list_is_accepted() {
        let mut doc = base_doc();
        doc.periods.clear();
        assert!(validate(&doc).unwrap().periods().is_empty());
    }

    #[test]
    fn zero_length_period_is_accepted() {
        let mut doc = base_doc();
        doc.periods[0].duration = 0;
        assert_eq!(validate(&doc).unwrap().periods()[0].duration_minutes, 0);
    }

    #[test]
    fn template_survives_document_round_trip() {
        let original = Schedule::template();
        let doc = ScheduleDocument::from(&original);
        assert_eq!(Schedule::try_from(&doc).unwrap(), original);
    }

    // ── times ─────────────────────────────────────────────────────────────────

    #[test]
    fn bad_time_format_is_rejected() {
        let mut doc = base_doc();
        doc.school_start_time = "8:00".into();
        assert_eq!(
            errors_of(&doc),
            vec![ValidationError::BadTimeFormat {
                field: "school_start_time",
                value: "8:00".into(),
            }]
        );
    }

    #[test]
    fn start_after_end_is_rejected() {
        let mut doc = base_doc();
        doc.school_start_time = "15:00".into();
        doc.school_end_time = "08:00".into();
        assert!(matches!(
            errors_of(&doc).as_slice(),
            [ValidationError::NonChronological { .. }]
        ));
    }

    #[test]
    fn start_equal_to_end_is_rejected() {
        let mut doc = base_doc();
        doc.school_end_time = "08:00".into();
        assert!(matches!(
            errors_of(&doc).as_slice(),
            [ValidationError::NonChronological { .. }]
        ));
    }

    // ── ranges ────────────────────────────────────────────────────────────────

    #[test]
    fn authoring_ranges_are_enforced() {
        let mut doc = base_doc();
        doc.days_per_cycle = 11;
        doc.class_duration = 9;
        doc.time_between_classes = 31;

        let fields: Vec<String> = errors_of(&doc)
            .into_iter()
            .map(|e| match e {
                ValidationError::OutOfRange { field, .. } => field,
                other => panic!("unexpected error: {other:?}"),
            })
            .collect();
        assert_eq!(
            fields,
            vec!["days_per_cycle", "class_duration", "time_between_classes"]
        );
    }

    #[test]
    fn negative_period_duration_is_rejected() {
        let mut doc = base_doc();
        doc.periods[0].duration = -5;
        assert_eq!(
            errors_of(&doc),
            vec![ValidationError::NegativeDuration {
                field: "periods[0].duration".into(),
                value: -5,
            }]
        );
    }

    #[test]
    fn lunch_duration_out_of_range_is_rejected() {
        let mut doc = base_doc();
        doc.lunch = Some(LunchEntry {
            start_time: "12:00".into(),
            duration: 5,
        });
        assert!(matches!(
            errors_of(&doc).as_slice(),
            [ValidationError::OutOfRange { field, .. }] if field == "lunch.duration"
        ));
    }

    // ── homeroom presence ─────────────────────────────────────────────────────

    #[test]
    fn homeroom_fields_required_with_homeroom() {
        let mut doc = base_doc();
        doc.has_homeroom = true;
        assert_eq!(
            errors_of(&doc),
            vec![
                ValidationError::MissingHomeroomField {
                    field: "homeroom_duration"
                },
                ValidationError::MissingHomeroomField {
                    field: "homeroom_period_name"
                },
            ]
        );
    }

    #[test]
    fn homeroom_fields_rejected_without_homeroom() {
        let mut doc = base_doc();
        doc.homeroom_duration = Some(15);
        assert_eq!(
            errors_of(&doc),
            vec![ValidationError::UnexpectedHomeroomField {
                field: "homeroom_duration"
            }]
        );
    }

    #[test]
    fn long_homeroom_is_accepted() {
        let mut doc = base_doc();
        doc.has_homeroom = true;
        doc.homeroom_duration = Some(150);
        doc.homeroom_period_name = Some("Assembly".into());
        assert_eq!(validate(&doc).unwrap().homeroom().unwrap().duration_minutes, 150);
    }

    #[test]
    fn zero_homeroom_duration_is_rejected() {
        let mut doc = base_doc();
        doc.has_homeroom = true;
        doc.homeroom_duration = Some(0);
        doc.homeroom_period_name = Some("Homeroom".into());
        assert!(matches!(
            errors_of(&doc).as_slice(),
            [ValidationError::OutOfRange { field, .. }] if field == "homeroom_duration"
        ));
    }

    #[test]
    fn blank_names_are_accepted() {
        let mut doc = base_doc();
        doc.periods[0].name = String::new();
        doc.has_homeroom = true;
        doc.homeroom_duration = Some(10);
        doc.homeroom_period_name = Some("  ".into());
        let s = validate(&doc).unwrap();
        assert_eq!(s.periods()[0].name, "");
        assert_eq!(s.homeroom().unwrap().name, "  ");
    }

    #[test]
    fn any_period_number_is_accepted() {
        let mut doc = base_doc();
        doc.periods[0].number = -3;
        assert_eq!(validate(&doc).unwrap().periods()[0].number, -3);
    }

    #[test]
    fn all_violations_are_collected() {
        let mut doc = base_doc();
        doc.school_end_time = "25:00".into();
        doc.days_per_cycle = 0;
        doc.periods[0].duration = -1;
        assert_eq!(errors_of(&doc).len(), 3);
    }
}
