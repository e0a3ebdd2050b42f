//! Rendering surface contract
//!
//! The engine draws through this trait; the host supplies an
//! implementation (the crate ships a tiny-skia one in `render::skia`).
//! Pointer-event coordinates handed to the controller are expected to be
//! relative to the same surface.

use crate::domain::core::Rect;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// The same color with its alpha replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Drawing primitives the scene needs from a host surface.
pub trait RenderSurface {
    /// Surface size in pixels, before the scale transform.
    fn size(&self) -> (f32, f32);

    /// Uniform scale applied to all subsequent drawing (for high-DPI
    /// hosts).
    fn set_scale(&mut self, scale: f32);

    /// Fills the whole surface.
    fn clear(&mut self, color: Rgba);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba);

    /// Draws `text` with its baseline-left at (x, y).
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba);
}
