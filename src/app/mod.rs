//! Application layer

pub mod controller;

pub use controller::{PlannerController, PlannerError};
