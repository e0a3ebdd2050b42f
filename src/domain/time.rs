//! Time primitives
//!
//! `LocalTime` is a minute-of-day value with no timezone concept. The valid
//! range is `[0, 2880)` so a time can refer to "tomorrow" (minute 1440 and
//! up), which is how overnight block end times are represented. `DayOfWeek`
//! is the usual 7-value enumeration, ordered Monday-first.

use std::fmt;

use crate::domain::error::DomainError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A wall-clock time as a minute-of-day, possibly on the following day.
///
/// Immutable value type. Construction fails for anything outside
/// `[0, 2880)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    minutes: u16,
}

impl LocalTime {
    /// Exclusive upper bound of the minute-of-day range (two days).
    pub const MAX_MINUTES: u16 = 2 * MINUTES_PER_DAY;

    /// Creates a time from a raw minute-of-day value.
    pub fn from_minutes(minutes: i32) -> Result<Self, DomainError> {
        if (0..Self::MAX_MINUTES as i32).contains(&minutes) {
            Ok(Self {
                minutes: minutes as u16,
            })
        } else {
            Err(DomainError::TimeOutOfRange(minutes))
        }
    }

    /// Creates a time from an hour (0..48) and minute (0..60).
    pub fn new(hour: u32, minute: u32) -> Result<Self, DomainError> {
        if minute >= 60 {
            return Err(DomainError::TimeOutOfRange((hour * 60 + minute) as i32));
        }
        Self::from_minutes((hour * 60 + minute) as i32)
    }

    /// Raw minute-of-day value, `0..2880`.
    pub fn minutes_of_day(&self) -> u16 {
        self.minutes
    }

    /// Hour on the clock face, `0..24`.
    pub fn hour(&self) -> u8 {
        ((self.minutes / 60) % 24) as u8
    }

    /// Minute within the hour, `0..60`.
    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// True when this time refers to the following day.
    pub fn is_next_day(&self) -> bool {
        self.minutes >= MINUTES_PER_DAY
    }

    /// The time as fractional hours in `[0, 48)`, the unit the grid layout
    /// engine works in.
    pub fn fractional_hour48(&self) -> f32 {
        self.minutes as f32 / 60.0
    }

    /// Hour index rounded down, `0..48`.
    pub fn floor_hour(&self) -> u32 {
        (self.minutes / 60) as u32
    }

    /// Hour index rounded up, `0..=48`.
    pub fn ceil_hour(&self) -> u32 {
        self.minutes.div_ceil(60) as u32
    }

    pub fn is_before(&self, other: LocalTime) -> bool {
        self.minutes < other.minutes
    }

    pub fn is_after(&self, other: LocalTime) -> bool {
        self.minutes > other.minutes
    }

    /// Rounds down to the enclosing hour boundary.
    pub fn start_of_hour(&self) -> LocalTime {
        LocalTime {
            minutes: self.minutes - self.minutes % 60,
        }
    }

    /// Rounds up to the enclosing hour boundary. A time already on an hour
    /// boundary maps to itself. Fails only for times in the final partial
    /// hour of the range, where the boundary would be minute 2880.
    pub fn end_of_hour(&self) -> Result<LocalTime, DomainError> {
        Self::from_minutes((self.minutes.div_ceil(60) as i32) * 60)
    }

    /// The same clock time one day earlier.
    pub fn yesterday(&self) -> Result<LocalTime, DomainError> {
        Self::from_minutes(self.minutes as i32 - MINUTES_PER_DAY as i32)
            .map_err(|_| DomainError::DayShiftOutOfRange)
    }

    /// The same clock time one day later.
    pub fn tomorrow(&self) -> Result<LocalTime, DomainError> {
        Self::from_minutes(self.minutes as i32 + MINUTES_PER_DAY as i32)
            .map_err(|_| DomainError::DayShiftOutOfRange)
    }

    /// Earliest of a set of times, `None` for an empty set.
    pub fn earliest<I: IntoIterator<Item = LocalTime>>(times: I) -> Option<LocalTime> {
        times.into_iter().min()
    }

    /// Latest of a set of times, `None` for an empty set.
    pub fn latest<I: IntoIterator<Item = LocalTime>>(times: I) -> Option<LocalTime> {
        times.into_iter().max()
    }

    /// Parses a strict 24-hour `H:MM` / `HH:MM` string. A leading `+` marks
    /// the time as belonging to the following day.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let fail = || DomainError::UnparsableTime(input.to_string());

        let (body, next_day) = match input.strip_prefix('+') {
            Some(rest) => (rest, true),
            None => (input, false),
        };

        let (hour_part, minute_part) = body.split_once(':').ok_or_else(fail)?;
        if hour_part.is_empty()
            || hour_part.len() > 2
            || minute_part.len() != 2
            || !hour_part.bytes().all(|b| b.is_ascii_digit())
            || !minute_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(fail());
        }

        let hour: u32 = hour_part.parse().map_err(|_| fail())?;
        let minute: u32 = minute_part.parse().map_err(|_| fail())?;
        if hour >= 24 || minute >= 60 {
            return Err(fail());
        }

        let mut minutes = hour * 60 + minute;
        if next_day {
            minutes += MINUTES_PER_DAY as u32;
        }
        Self::from_minutes(minutes as i32)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_next_day() {
            write!(f, "+{}:{:02}", self.hour(), self.minute())
        } else {
            write!(f, "{}:{:02}", self.hour(), self.minute())
        }
    }
}

/// A day of the week, Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in Monday-first order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Monday to Friday.
    pub const WEEKDAYS: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    /// Converts a zero-based "days since Monday" value.
    pub fn from_days_since_monday(value: i64) -> Result<Self, DomainError> {
        match value {
            0..7 => Ok(Self::ALL[value as usize]),
            _ => Err(DomainError::InvalidDayNumber(value)),
        }
    }

    /// Zero-based "days since Monday" value.
    pub fn days_since_monday(&self) -> u8 {
        *self as u8
    }

    /// Three-letter lowercase code, `mon`..`sun`.
    pub fn code(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "mon",
            DayOfWeek::Tuesday => "tue",
            DayOfWeek::Wednesday => "wed",
            DayOfWeek::Thursday => "thu",
            DayOfWeek::Friday => "fri",
            DayOfWeek::Saturday => "sat",
            DayOfWeek::Sunday => "sun",
        }
    }

    /// Parses a three-letter day code, case-insensitively.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let lower = code.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.code() == lower)
            .ok_or_else(|| DomainError::UnknownDayCode(code.to_string()))
    }

    /// The following day, wrapping Sunday to Monday.
    pub fn succ(&self) -> DayOfWeek {
        Self::ALL[(self.days_since_monday() as usize + 1) % 7]
    }

    /// The preceding day, wrapping Monday to Sunday.
    pub fn pred(&self) -> DayOfWeek {
        Self::ALL[(self.days_since_monday() as usize + 6) % 7]
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
