//! Timetable domain model
//!
//! Pure types with no knowledge of grids, pixels or rendering. All
//! consistency invariants and the clash/allocation queries live here.

pub mod block;
pub mod choices;
pub mod class;
pub mod core;
pub mod error;
pub mod time;

pub use block::TimetableBlock;
pub use choices::{Timetable, TimetableChoice, TimetableChoices};
pub use class::{Accent, TimetableClass, TimetableOption};
pub use core::{Point, Rect};
pub use error::DomainError;
pub use time::{DayOfWeek, LocalTime};
