//! Rendering: surface contract, tiny-skia backend and scene composition

pub mod scene;
pub mod skia;
pub mod surface;

pub use scene::Scene;
pub use skia::{RenderError, SkiaSurface};
pub use surface::{RenderSurface, Rgba};
