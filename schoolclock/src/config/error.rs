/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for schedule loading.
//!
//! Two error enums model the two failure layers:
//!
//! * [`ValidationError`] – one broken rule inside an otherwise well-formed
//!   document (field name plus the offending value).
//! * [`ConfigError`] – top-level failure returned from
//!   [`ScheduleLoader::load_from_file()`](super::ScheduleLoader::load_from_file).
//!
//! Every failure is a load-time failure: once a [`Schedule`](crate::Schedule)
//! exists, resolution cannot fail.

use std::path::PathBuf;

use thiserror::Error;

// ── Validation ────────────────────────────────────────────────────────────────

/// A single rule violated by a schedule document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A time field is not a zero-padded 24-hour `"HH:MM"` string.
    #[error("{field}: '{value}' is not a 24-hour HH:MM time")]
    BadTimeFormat { field: &'static str, value: String },

    /// `school_start_time` is not strictly before `school_end_time`.
    #[error("school_start_time {start} must be before school_end_time {end}")]
    NonChronological { start: String, end: String },

    /// An integer field lies outside its permitted range.
    #[error("{field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A duration is negative.
    #[error("{field}: duration {value} is negative")]
    NegativeDuration { field: String, value: i64 },

    /// `has_homeroom` is true but a homeroom field is missing.
    #[error("{field} is required when has_homeroom is true")]
    MissingHomeroomField { field: &'static str },

    /// `has_homeroom` is false but a homeroom field is present.
    #[error("{field} must be absent when has_homeroom is false")]
    UnexpectedHomeroomField { field: &'static str },
}

// ── Top-level config errors ───────────────────────────────────────────────────

/// Top-level error type returned by
/// [`ScheduleLoader::load_from_file()`](super::ScheduleLoader::load_from_file).
///
/// | Variant | Meaning |
/// |---|---|
/// | `Missing` | no document at the path – run the authoring tool first |
/// | `Io` | document exists but could not be read or written |
/// | `Parse` | not valid JSON / YAML, or a field has the wrong type |
/// | `Serialize` | a schedule could not be rendered for saving |
/// | `Invalid` | well-formed but breaks one or more schedule rules |
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("schedule document not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("cannot access schedule document {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schedule document {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize schedule document {}: {message}", .path.display())]
    Serialize { path: PathBuf, message: String },

    /// Every violated rule is listed, not just the first.
    #[error("invalid schedule document: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

impl ConfigError {
    /// `true` for [`ConfigError::Missing`] – the one case the operator fixes
    /// by creating a document rather than editing one.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::Missing { .. })
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
