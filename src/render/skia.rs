//! tiny-skia implementation of the render surface
//!
//! Rasterizes into an RGBA pixmap. Text runs through ab_glyph with a font
//! the host attaches; without one, text calls are skipped with a warning so
//! headless tests can render scenes without shipping font data.

use ab_glyph::{Font, FontVec, Glyph, PxScale, ScaleFont};
use thiserror::Error;
use tiny_skia::{
    Color, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect as SkiaRect, Stroke, Transform,
};

use crate::domain::core::Rect;
use crate::render::surface::{RenderSurface, Rgba};

/// Rasterization errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create a {width}x{height} pixmap")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("the attached font data could not be parsed")]
    InvalidFont,
}

/// A CPU raster surface backed by a tiny-skia pixmap.
pub struct SkiaSurface {
    pixmap: Pixmap,
    scale: f32,
    font: Option<FontVec>,
    missing_font_warned: bool,
}

impl SkiaSurface {
    /// Creates a surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::PixmapCreationFailed { width, height })?;
        Ok(Self {
            pixmap,
            scale: 1.0,
            font: None,
            missing_font_warned: false,
        })
    }

    /// Attaches the font used for all text drawing.
    pub fn set_font(&mut self, font_data: Vec<u8>) -> Result<(), RenderError> {
        self.font = Some(FontVec::try_from_vec(font_data).map_err(|_| RenderError::InvalidFont)?);
        Ok(())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The rendered pixels as RGBA bytes, four per pixel.
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixmap.data().to_vec()
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    fn to_color(color: Rgba) -> Color {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }

    /// Blends one glyph coverage sample over the destination pixel.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.pixmap.width() as i32 || y >= self.pixmap.height() as i32 {
            return;
        }
        let alpha = (coverage * color.a as f32 / 255.0).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let index = y as usize * self.pixmap.width() as usize + x as usize;
        let pixels = self.pixmap.pixels_mut();
        let dst = pixels[index];

        let inverse = 1.0 - alpha;
        let out_a = alpha + dst.alpha() as f32 / 255.0 * inverse;
        let out_r = color.r as f32 / 255.0 * alpha + dst.red() as f32 / 255.0 * inverse;
        let out_g = color.g as f32 / 255.0 * alpha + dst.green() as f32 / 255.0 * inverse;
        let out_b = color.b as f32 / 255.0 * alpha + dst.blue() as f32 / 255.0 * inverse;

        let a8 = (out_a * 255.0).round() as u8;
        let r8 = ((out_r * 255.0).round() as u8).min(a8);
        let g8 = ((out_g * 255.0).round() as u8).min(a8);
        let b8 = ((out_b * 255.0).round() as u8).min(a8);
        if let Some(blended) = PremultipliedColorU8::from_rgba(r8, g8, b8, a8) {
            pixels[index] = blended;
        }
    }
}

impl RenderSurface for SkiaSurface {
    fn size(&self) -> (f32, f32) {
        (
            self.pixmap.width() as f32 / self.scale,
            self.pixmap.height() as f32 / self.scale,
        )
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
    }

    fn clear(&mut self, color: Rgba) {
        self.pixmap.fill(Self::to_color(color));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgba) {
        let mut path_builder = PathBuilder::new();
        path_builder.move_to(x1, y1);
        path_builder.line_to(x2, y2);
        let Some(path) = path_builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(Self::to_color(color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform(), None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(skia_rect) = SkiaRect::from_xywh(rect.x, rect.y, rect.w, rect.h) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(Self::to_color(color));
        self.pixmap
            .fill_rect(skia_rect, &paint, self.transform(), None);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba) {
        let Some(skia_rect) = SkiaRect::from_xywh(rect.x, rect.y, rect.w, rect.h) else {
            return;
        };
        let mut path_builder = PathBuilder::new();
        path_builder.push_rect(skia_rect);
        let Some(path) = path_builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(Self::to_color(color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform(), None);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba) {
        let Some(font) = self.font.take() else {
            if !self.missing_font_warned {
                log::warn!("text drawing skipped: no font attached to the surface");
                self.missing_font_warned = true;
            }
            return;
        };

        let px_scale = PxScale::from(size * self.scale);
        let scaled = font.as_scaled(px_scale);
        let mut caret = x * self.scale;
        let baseline = y * self.scale;
        let mut previous: Option<Glyph> = None;

        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(prev) = previous.take() {
                caret += scaled.kern(prev.id, glyph.id);
            }
            glyph.position = ab_glyph::point(caret, baseline);
            caret += scaled.h_advance(glyph.id);
            previous = Some(glyph.clone());

            if let Some(outline) = scaled.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|gx, gy, coverage| {
                    self.blend_pixel(
                        bounds.min.x as i32 + gx as i32,
                        bounds.min.y as i32 + gy as i32,
                        color,
                        coverage,
                    );
                });
            }
        }

        self.font = Some(font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(surface: &SkiaSurface, x: u32, y: u32) -> PremultipliedColorU8 {
        surface.pixmap().pixels()[(y * surface.pixmap().width() + x) as usize]
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert!(matches!(
            SkiaSurface::new(0, 10),
            Err(RenderError::PixmapCreationFailed { .. })
        ));
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut surface = SkiaSurface::new(4, 4).unwrap();
        surface.clear(Rgba::opaque(10, 20, 30));
        let p = pixel(&surface, 2, 2);
        assert_eq!((p.red(), p.green(), p.blue(), p.alpha()), (10, 20, 30, 255));
    }

    #[test]
    fn fill_rect_covers_its_interior_only() {
        let mut surface = SkiaSurface::new(10, 10).unwrap();
        surface.clear(Rgba::opaque(0, 0, 0));
        surface.fill_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Rgba::opaque(255, 0, 0));
        assert_eq!(pixel(&surface, 3, 3).red(), 255);
        assert_eq!(pixel(&surface, 8, 8).red(), 0);
    }

    #[test]
    fn degenerate_rect_is_ignored() {
        let mut surface = SkiaSurface::new(10, 10).unwrap();
        surface.fill_rect(Rect::new(2.0, 2.0, 0.0, 4.0), Rgba::opaque(255, 0, 0));
        surface.stroke_rect(Rect::new(2.0, 2.0, -1.0, 4.0), 1.0, Rgba::opaque(255, 0, 0));
        assert_eq!(pixel(&surface, 2, 3).alpha(), 0);
    }

    #[test]
    fn line_leaves_a_mark() {
        let mut surface = SkiaSurface::new(10, 10).unwrap();
        surface.clear(Rgba::opaque(0, 0, 0));
        surface.line(0.0, 5.0, 10.0, 5.0, 2.0, Rgba::opaque(0, 255, 0));
        assert!(pixel(&surface, 5, 5).green() > 0);
    }

    #[test]
    fn scale_transforms_drawing_and_reported_size() {
        let mut surface = SkiaSurface::new(20, 20).unwrap();
        surface.set_scale(2.0);
        assert_eq!(surface.size(), (10.0, 10.0));

        // a rect at logical (1,1) lands at pixel (2,2)
        surface.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Rgba::opaque(0, 0, 255));
        assert_eq!(pixel(&surface, 3, 3).blue(), 255);
        assert_eq!(pixel(&surface, 1, 1).blue(), 0);
    }

    #[test]
    fn text_without_a_font_is_skipped() {
        let mut surface = SkiaSurface::new(10, 10).unwrap();
        surface.clear(Rgba::opaque(0, 0, 0));
        surface.text("9:00", 0.0, 8.0, 8.0, Rgba::opaque(255, 255, 255));
        assert!(surface.pixmap().pixels().iter().all(|p| p.red() == 0));
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        let mut surface = SkiaSurface::new(10, 10).unwrap();
        assert!(matches!(
            surface.set_font(vec![0, 1, 2, 3]),
            Err(RenderError::InvalidFont)
        ));
    }
}
