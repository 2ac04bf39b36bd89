/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! School clock – which period is it right now?
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/      – schedule document (JSON / YAML) loading and validation
//! ├── schedule     – validated, immutable Schedule types
//! ├── timeline/    – block interval construction + "HH:MM" arithmetic
//! └── resolver/    – (schedule, instant) → period label
//! ```
//!
//! The data flow is one-way:
//!
//! ```text
//! school_schedule.json ──(ScheduleLoader)──► Schedule ──(Timeline::build)──► Timeline
//!                                                                              │
//!                                  NaiveTime ──(PeriodResolver::resolve)───────┴──► ResolvedPeriod
//! ```

pub mod config;
pub mod resolver;
pub mod schedule;
pub mod timeline;

pub use config::{ConfigError, ScheduleLoader, ValidationError};
pub use resolver::{resolve, PeriodResolver, ResolvedPeriod};
pub use schedule::Schedule;
pub use timeline::Timeline;
