//! Grid geometry: day columns and hour span
//!
//! Derives, from a timetable, which day columns to display and which hour
//! range each column covers, then maps (day, time) pairs to fractional grid
//! coordinates. Hours are counted in the 0..48 space of `LocalTime` so a
//! column can extend past midnight.
//!
//! The dimensions are recomputed wholesale whenever the timetable changes;
//! nothing here is incrementally mutated.

use thiserror::Error;

use crate::config::LayoutConfig;
use crate::domain::time::{DayOfWeek, LocalTime};
use crate::domain::Timetable;

/// Errors from grid coordinate lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The requested day has no column in the active day set.
    #[error("day {day} is not displayed by the current grid")]
    DayNotDisplayed { day: DayOfWeek },
}

/// A position on the grid: column index plus a fractional-hour row offset
/// from the grid's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPos {
    pub col: usize,
    pub row: f32,
}

/// The visible day columns and hour span for one timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDimensions {
    days: Vec<DayOfWeek>,
    start_hour: u32,
    end_hour: u32,
}

impl GridDimensions {
    /// Computes dimensions for a timetable.
    ///
    /// The hour span covers every block of every option of every class (not
    /// just chosen ones, so alternatives can be shown during a drag): the
    /// earliest start rounded down to the hour, the latest end rounded up.
    /// When the latest end passes midnight and still lies within 24 hours
    /// of `split = min(earliest, late_night_split)`, the span is anchored
    /// at `[split, split + 24)` so overnight schedules render as one
    /// continuous column set; otherwise the raw span is kept. A block
    /// ending past the bottom edge wraps into the next day's column (see
    /// `visual::map_block`).
    ///
    /// Monday to Friday are shown unless some block, placed against that
    /// span, touches Saturday or Sunday. An empty timetable falls back to
    /// the configured default view.
    pub fn for_timetable(timetable: &Timetable, config: &LayoutConfig) -> Self {
        let earliest = timetable
            .all_blocks()
            .map(|block| block.start_time().floor_hour())
            .min();
        let latest = timetable
            .all_blocks()
            .map(|block| block.end_time().ceil_hour())
            .max();

        let (Some(earliest), Some(latest)) = (earliest, latest) else {
            return Self {
                days: DayOfWeek::ALL.to_vec(),
                start_hour: config.default_start_hour,
                end_hour: config.default_end_hour,
            };
        };

        let split = earliest.min(config.late_night_split);
        let (start_hour, end_hour) = if latest > 24 && latest - split <= 24 {
            (split, split + 24)
        } else {
            (earliest, latest)
        };

        let show_weekend = timetable.all_blocks().any(|block| {
            block.day().is_weekend()
                || (block.end_time().minutes_of_day() as u32 > end_hour * 60
                    && block.day().succ().is_weekend())
        });
        let days = if show_weekend {
            DayOfWeek::ALL.to_vec()
        } else {
            DayOfWeek::WEEKDAYS.to_vec()
        };

        Self {
            days,
            start_hour,
            end_hour,
        }
    }

    pub fn days(&self) -> &[DayOfWeek] {
        &self.days
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// First displayed hour, in 0..48 space.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// One past the last displayed hour, in 0..48 space.
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn hour_count(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Row coordinate of the grid's bottom edge.
    pub fn bottom_row(&self) -> f32 {
        self.hour_count() as f32
    }

    /// Column index of a day in the active day set.
    pub fn column_of(&self, day: DayOfWeek) -> Result<usize, LayoutError> {
        self.days
            .iter()
            .position(|d| *d == day)
            .ok_or(LayoutError::DayNotDisplayed { day })
    }

    /// Maps a (day, time) pair to grid coordinates. The row is the time's
    /// fractional-hour offset from the grid's top edge; callers decide how
    /// to treat rows beyond the bottom edge.
    pub fn time_location(&self, day: DayOfWeek, time: LocalTime) -> Result<GridPos, LayoutError> {
        let col = self.column_of(day)?;
        Ok(GridPos {
            col,
            row: time.fractional_hour48() - self.start_hour as f32,
        })
    }

    /// True when a time lies beyond the bottom of a day column, i.e. the
    /// instant belongs in the following day's column.
    pub fn crosses_day_boundary(&self, time: LocalTime) -> bool {
        time.minutes_of_day() as u32 > self.end_hour * 60
    }

    /// The hour labels of the gutter, top to bottom, as clock-face hours.
    pub fn hour_labels(&self) -> impl Iterator<Item = u32> + '_ {
        (self.start_hour..self.end_hour).map(|hour| hour % 24)
    }
}
