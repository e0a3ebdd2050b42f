//! Grid layout engine

pub mod grid;

pub use grid::{GridDimensions, GridPos, LayoutError};
