/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure time-of-day helpers: `"HH:MM"` parsing and elapsed-minute arithmetic.
//!
//! Free functions so they can be used from the config validator, the
//! timeline and the binaries without pulling in any of those types.

use chrono::{NaiveTime, Timelike};

/// Parse a zero-padded 24-hour `"HH:MM"` string.
///
/// chrono's `%H` also accepts a single hour digit and skips leading
/// whitespace, so the shape is checked byte by byte first.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let well_formed = s.len() == 5
        && s.bytes().enumerate().all(|(i, b)| {
            if i == 2 {
                b == b':'
            } else {
                b.is_ascii_digit()
            }
        });
    if !well_formed {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Format a time of day as `"HH:MM"`.
pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Minutes elapsed from `start` to `now`, fractional.
///
/// Negative when `now` is before `start`.  Sub-second precision is kept so a
/// continuous clock resolves on the correct side of a boundary.
pub fn minutes_since(start: NaiveTime, now: NaiveTime) -> f64 {
    let delta = now.signed_duration_since(start);
    delta.num_milliseconds() as f64 / 60_000.0
}

/// Whole minutes from `start` to `end` (`end` assumed not before `start`).
pub fn whole_minutes_between(start: NaiveTime, end: NaiveTime) -> u32 {
    end.signed_duration_since(start).num_minutes().max(0) as u32
}

/// `start` shifted forward by `minutes`, or `None` past midnight.
pub fn offset_by_minutes(start: NaiveTime, minutes: u32) -> Option<NaiveTime> {
    let total = minutes
        .checked_mul(60)?
        .checked_add(start.num_seconds_from_midnight())?;
    NaiveTime::from_num_seconds_from_midnight_opt(total, 0)
}

/// Drop seconds and sub-seconds, keeping only hour and minute.
pub fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // ── parse_hhmm ────────────────────────────────────────────────────────────

    #[test]
    fn parse_accepts_zero_padded_times() {
        assert_eq!(parse_hhmm("08:00"), Some(t(8, 0)));
        assert_eq!(parse_hhmm("00:00"), Some(t(0, 0)));
        assert_eq!(parse_hhmm("23:59"), Some(t(23, 59)));
    }

    #[test]
    fn parse_rejects_unpadded_and_malformed_times() {
        assert_eq!(parse_hhmm("8:00"), None);
        assert_eq!(parse_hhmm("08:0"), None);
        assert_eq!(parse_hhmm("0800"), None);
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("ab:cd"), None);
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm(" 8:00"), None);
        assert_eq!(parse_hhmm("08: 5"), None);
        assert_eq!(parse_hhmm("+8:00"), None);
    }

    #[test]
    fn format_round_trips_through_parse() {
        assert_eq!(format_hhmm(t(9, 5)), "09:05");
        assert_eq!(parse_hhmm(&format_hhmm(t(14, 30))), Some(t(14, 30)));
    }

    // ── minute arithmetic ─────────────────────────────────────────────────────

    #[test]
    fn minutes_since_is_fractional_and_signed() {
        let start = t(8, 0);
        assert_eq!(minutes_since(start, t(8, 20)), 20.0);
        assert_eq!(minutes_since(start, t(7, 59)), -1.0);
        let half = NaiveTime::from_hms_opt(8, 0, 30).unwrap();
        assert!((minutes_since(start, half) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn whole_minutes_between_school_bounds() {
        assert_eq!(whole_minutes_between(t(8, 0), t(15, 0)), 420);
        assert_eq!(whole_minutes_between(t(15, 0), t(8, 0)), 0);
    }

    #[test]
    fn offset_by_minutes_stops_at_midnight() {
        assert_eq!(offset_by_minutes(t(8, 0), 65), Some(t(9, 5)));
        assert_eq!(offset_by_minutes(t(23, 0), 60), None);
    }

    #[test]
    fn truncate_drops_seconds() {
        let precise = NaiveTime::from_hms_milli_opt(10, 42, 59, 999).unwrap();
        assert_eq!(truncate_to_minute(precise), t(10, 42));
    }
}
