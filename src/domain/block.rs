//! Timetable blocks
//!
//! A block is one contiguous day/time/duration interval, optionally marked
//! as online. Blocks carry the clash test and the canonical block-string
//! codec (`"mon 13:00 2h online"`, `"fri 9:30 90m"`).

use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::time::{DayOfWeek, LocalTime};

/// A single scheduled interval within the week.
///
/// Immutable value type. The start time must lie on the block's own day
/// (never a next-day time); the end time may spill into the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimetableBlock {
    day: DayOfWeek,
    start: LocalTime,
    duration_mins: u16,
    online: bool,
}

impl TimetableBlock {
    /// Longest permitted block, one full day.
    pub const MAX_DURATION_MINS: u16 = 1440;

    /// Creates a block.
    ///
    /// # Errors
    /// - the start time is a next-day time
    /// - the duration is outside `1..=1440` minutes
    pub fn new(
        day: DayOfWeek,
        start: LocalTime,
        duration_mins: i64,
        online: bool,
    ) -> Result<Self, DomainError> {
        if start.is_next_day() {
            return Err(DomainError::NextDayStart);
        }
        if !(1..=Self::MAX_DURATION_MINS as i64).contains(&duration_mins) {
            return Err(DomainError::DurationOutOfRange(duration_mins));
        }
        Ok(Self {
            day,
            start,
            duration_mins: duration_mins as u16,
            online,
        })
    }

    pub fn day(&self) -> DayOfWeek {
        self.day
    }

    pub fn start_time(&self) -> LocalTime {
        self.start
    }

    pub fn duration_mins(&self) -> u16 {
        self.duration_mins
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// The instant the block ends. Always representable: a block starting
    /// before midnight and lasting at most a day ends before minute 2880.
    pub fn end_time(&self) -> LocalTime {
        LocalTime::from_minutes(self.start.minutes_of_day() as i32 + self.duration_mins as i32)
            .unwrap_or(self.start)
    }

    /// Two blocks clash iff they are on the same day and their half-open
    /// `[start, start + duration)` intervals overlap.
    pub fn clashes_with(&self, other: &TimetableBlock) -> bool {
        self.day == other.day
            && self.start.is_before(other.end_time())
            && other.start.is_before(self.end_time())
    }

    /// Parses the canonical block-string form:
    /// `"<day-code> <24h-start-time> <duration><h|m> [online]"`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let fail = || DomainError::UnparsableBlock(input.to_string());

        let mut parts = input.split_whitespace();
        let day_part = parts.next().ok_or_else(fail)?;
        let time_part = parts.next().ok_or_else(fail)?;
        let duration_part = parts.next().ok_or_else(fail)?;
        let online = match parts.next() {
            None => false,
            Some("online") => true,
            Some(_) => return Err(fail()),
        };
        if parts.next().is_some() {
            return Err(fail());
        }

        let day = DayOfWeek::parse(day_part)?;
        let start = LocalTime::parse(time_part)?;
        let duration_mins = parse_duration(duration_part).ok_or_else(fail)?;

        Self::new(day, start, duration_mins, online)
    }
}

/// Parses `"<n>h"` or `"<n>m"` into minutes.
fn parse_duration(input: &str) -> Option<i64> {
    let (number, unit) = input.split_at(input.len().checked_sub(1)?);
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = number.parse().ok()?;
    match unit {
        "h" => Some(value * 60),
        "m" => Some(value),
        _ => None,
    }
}

impl fmt::Display for TimetableBlock {
    /// Renders the canonical block-string form. The duration is normalized
    /// to hours when evenly divisible.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.day, self.start)?;
        if self.duration_mins % 60 == 0 {
            write!(f, "{}h", self.duration_mins / 60)?;
        } else {
            write!(f, "{}m", self.duration_mins)?;
        }
        if self.online {
            write!(f, " online")?;
        }
        Ok(())
    }
}
