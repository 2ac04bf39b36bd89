/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Day timeline: the schedule laid out as sorted, disjoint minute intervals.
//!
//! # Construction
//! Homeroom (if any) and then every period, in document order, are folded
//! into [`Block`]s.  A cursor starts at minute 0 (the school start); each
//! block occupies `[cursor, cursor + duration)` and the cursor then advances
//! by `duration + time_between_classes`.
//!
//! ```text
//! minute   0        15  20                    65  70
//!          ├─Homeroom─┤gap├──────Period 1────────┤gap├── …
//! ```
//!
//! Homeroom always comes first.  Lunch and `before_homeroom` are not
//! consulted here.
//!
//! # Lookup
//! Blocks are sorted with non-decreasing ends, so the only candidate for an
//! instant is the first block whose end lies after it; that one is found
//! with a binary search and then checked for `start <= elapsed`.

pub mod clock;

use chrono::NaiveTime;
use tracing::debug;

use crate::schedule::Schedule;
use clock::offset_by_minutes;

// ── Block ─────────────────────────────────────────────────────────────────────

/// What a block represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Homeroom { name: String },
    Class { number: i64, name: String },
}

impl BlockKind {
    /// The label shown while this block is in session.
    pub fn name(&self) -> &str {
        match self {
            BlockKind::Homeroom { name } | BlockKind::Class { name, .. } => name,
        }
    }
}

/// A contiguous named interval, in minutes since school start.
///
/// Membership is half-open: `start_minute <= t < end_minute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub start_minute: u32,
    pub end_minute: u32,
    pub kind: BlockKind,
}

impl Block {
    pub fn contains(&self, elapsed_minutes: f64) -> bool {
        f64::from(self.start_minute) <= elapsed_minutes
            && elapsed_minutes < f64::from(self.end_minute)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }
}

/// An unnamed interval between (or after) blocks, in minutes since start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start_minute: u32,
    pub end_minute: u32,
}

// ── Timeline ──────────────────────────────────────────────────────────────────

/// A schedule's blocks plus the length of the school day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    start: NaiveTime,
    blocks: Vec<Block>,
    day_length_minutes: u32,
}

impl Timeline {
    /// Lay out `schedule`'s blocks.
    pub fn build(schedule: &Schedule) -> Self {
        let gap = schedule.time_between_classes();

        let homeroom = schedule.homeroom().map(|hr| {
            (
                hr.duration_minutes,
                BlockKind::Homeroom {
                    name: hr.name.clone(),
                },
            )
        });
        let periods = schedule.periods().iter().map(|p| {
            (
                p.duration_minutes,
                BlockKind::Class {
                    number: p.number,
                    name: p.name.clone(),
                },
            )
        });

        let (blocks, _cursor) = homeroom.into_iter().chain(periods).fold(
            (Vec::new(), 0u32),
            |(mut blocks, cursor), (duration, kind)| {
                let end_minute = cursor.saturating_add(duration);
                blocks.push(Block {
                    start_minute: cursor,
                    end_minute,
                    kind,
                });
                (blocks, end_minute.saturating_add(gap))
            },
        );

        for b in &blocks {
            debug!(
                start = b.start_minute,
                end = b.end_minute,
                "  block {}",
                b.kind.name()
            );
        }

        Self {
            start: schedule.start(),
            blocks,
            day_length_minutes: schedule.day_length_minutes(),
        }
    }

    /// School start – minute 0 of the timeline.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// All blocks, in timeline order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn day_length_minutes(&self) -> u32 {
        self.day_length_minutes
    }

    /// The block containing `elapsed_minutes`, if any.
    pub fn block_at(&self, elapsed_minutes: f64) -> Option<&Block> {
        let idx = self
            .blocks
            .partition_point(|b| f64::from(b.end_minute) <= elapsed_minutes);
        self.blocks
            .get(idx)
            .filter(|b| b.contains(elapsed_minutes))
    }

    /// Unnamed intervals inside `[0, day_length)`: between blocks and after
    /// the last one.  Zero-length gaps are skipped.
    pub fn gaps(&self) -> Vec<Gap> {
        let day = self.day_length_minutes;
        let mut gaps = Vec::new();
        let mut cursor = 0u32;

        for b in &self.blocks {
            if b.start_minute >= day {
                break;
            }
            if b.start_minute > cursor {
                gaps.push(Gap {
                    start_minute: cursor,
                    end_minute: b.start_minute,
                });
            }
            cursor = cursor.max(b.end_minute);
        }
        if cursor < day {
            gaps.push(Gap {
                start_minute: cursor,
                end_minute: day,
            });
        }
        gaps
    }

    /// Wall-clock time at `minute` past school start, `None` past midnight.
    pub fn time_at(&self, minute: u32) -> Option<NaiveTime> {
        offset_by_minutes(self.start, minute)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
