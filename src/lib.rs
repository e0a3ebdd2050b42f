//! Weekly timetable planner core
//!
//! Models a weekly class timetable (classes offering alternative schedule
//! options, exactly one choice per class) and drives an interactive visual
//! planner on top of it: a day-by-hour grid layout, animated block
//! transitions, and drag-to-reschedule pointer interaction. Rendering goes
//! through a small surface trait with a tiny-skia backend included;
//! windowing, input events and the frame clock stay with the host.
//!
//! The layers build on each other from the bottom up:
//!
//! - `domain`: timetables, blocks, classes, choices and their invariants
//! - `layout`: day columns and hour span derived from a timetable
//! - `visual`: animated visual blocks and the drag state machine
//! - `render`: scene composition and the tiny-skia surface
//! - `io`: the versioned JSON snapshot document
//! - `app`: the controller a host embeds
//!
//! ```no_run
//! use timegrid::app::PlannerController;
//! use timegrid::config::{AnimationConfig, LayoutConfig, Theme};
//! use timegrid::io;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = io::from_json(
//!     r#"{"version":"2","classes":[
//!         {"name":"Algebra","type":"Lecture","color":"blue","options":["mon 9:00 2h"]}
//!     ]}"#,
//! )?;
//! let planner = PlannerController::new(
//!     snapshot,
//!     LayoutConfig::default(),
//!     AnimationConfig::default(),
//!     Theme::default(),
//!     1280.0,
//!     800.0,
//! )?;
//!
//! let mut surface = timegrid::render::SkiaSurface::new(1280, 800)?;
//! planner.render(&mut surface);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod io;
pub mod layout;
pub mod render;
pub mod visual;

pub use app::{PlannerController, PlannerError};
pub use config::{AnimationConfig, LayoutConfig, Theme};
pub use domain::{
    Accent, DayOfWeek, DomainError, LocalTime, Point, Rect, Timetable, TimetableBlock,
    TimetableChoice, TimetableChoices, TimetableClass, TimetableOption,
};
