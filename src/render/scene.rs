//! Scene composition
//!
//! Turns the current snapshot, grid and visual set into draw calls on a
//! `RenderSurface`. The scene borrows everything and owns nothing; the
//! controller rebuilds it per frame.

use crate::config::Theme;
use crate::domain::TimetableChoices;
use crate::layout::GridDimensions;
use crate::render::surface::{RenderSurface, Rgba};
use crate::visual::animation::FrameScheduler;
use crate::visual::blocks::{Metrics, VisualBlock, VisualKind, VisualSet};

const GRID_LINE_WIDTH: f32 = 1.0;
const OUTLINE_WIDTH: f32 = 2.0;
const TEXT_INSET: f32 = 4.0;

/// One frame's worth of drawing state.
pub struct Scene<'a> {
    pub snapshot: &'a TimetableChoices,
    pub dims: &'a GridDimensions,
    pub metrics: &'a Metrics,
    pub visuals: &'a VisualSet,
    pub scheduler: &'a FrameScheduler,
    pub theme: &'a Theme,
    /// The block carried by an active drag, drawn above everything else.
    pub dragging: Option<u64>,
}

impl Scene<'_> {
    /// Draws the whole frame.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.clear(self.theme.background);
        self.draw_day_headers(surface);
        self.draw_hour_gutter(surface);
        self.draw_grid_lines(surface);
        self.draw_blocks(surface);
        self.draw_unallocated_warning(surface);
    }

    fn draw_day_headers(&self, surface: &mut dyn RenderSurface) {
        let baseline = Metrics::HEADER_HEIGHT - TEXT_INSET * 2.0;
        for (col, day) in self.dims.days().iter().enumerate() {
            surface.text(
                day.code(),
                self.metrics.column_x(col) + TEXT_INSET,
                baseline,
                self.theme.label_size,
                self.theme.header_text,
            );
        }
    }

    fn draw_hour_gutter(&self, surface: &mut dyn RenderSurface) {
        for (row, hour) in self.dims.hour_labels().enumerate() {
            surface.text(
                &format!("{hour}:00"),
                TEXT_INSET,
                self.metrics.row_y(row as f32) + self.theme.label_size,
                self.theme.label_size,
                self.theme.gutter_text,
            );
        }
    }

    fn draw_grid_lines(&self, surface: &mut dyn RenderSurface) {
        let top = self.metrics.origin_y;
        let bottom = self.metrics.row_y(self.dims.bottom_row());
        let left = self.metrics.origin_x;
        let right = self.metrics.column_x(self.dims.day_count());

        for col in 0..=self.dims.day_count() {
            let x = self.metrics.column_x(col);
            surface.line(x, top, x, bottom, GRID_LINE_WIDTH, self.theme.grid_line);
        }
        for row in 0..=self.dims.hour_count() {
            let y = self.metrics.row_y(row as f32);
            surface.line(left, y, right, y, GRID_LINE_WIDTH, self.theme.grid_line);
        }
    }

    fn draw_blocks(&self, surface: &mut dyn RenderSurface) {
        let clashing = self.snapshot.clashing_blocks();
        for visual in self.visuals.draw_order(self.dragging) {
            self.draw_block(surface, visual, &clashing);
        }
    }

    fn draw_block(
        &self,
        surface: &mut dyn RenderSurface,
        visual: &VisualBlock,
        clashing: &[crate::domain::TimetableBlock],
    ) {
        let rect = visual.current_rect(self.scheduler);
        surface.fill_rect(rect, self.block_fill(visual));

        let is_suggestion = matches!(visual.kind, VisualKind::Suggestion { .. });
        if !is_suggestion && clashing.contains(&visual.block) {
            surface.stroke_rect(rect, OUTLINE_WIDTH, self.theme.clash_outline);
        }
        if visual.highlighted {
            surface.stroke_rect(rect, OUTLINE_WIDTH, self.theme.highlight_outline);
        }

        let text_size = self.theme.block_text_size;
        surface.text(
            &visual.caption,
            rect.x + TEXT_INSET,
            rect.y + text_size + 2.0,
            text_size,
            self.theme.block_text,
        );
        surface.text(
            &visual.block.start_time().to_string(),
            rect.x + TEXT_INSET,
            rect.y + text_size * 2.0 + 4.0,
            self.theme.label_size,
            self.theme.block_text,
        );
        if let VisualKind::Suggestion {
            label: Some(label), ..
        } = visual.kind
        {
            surface.text(
                &label.to_string(),
                rect.right() - text_size,
                rect.y + text_size + 2.0,
                text_size,
                self.theme.block_text,
            );
        }
    }

    fn block_fill(&self, visual: &VisualBlock) -> Rgba {
        let fill = self.theme.accent(visual.accent);
        match visual.kind {
            VisualKind::Suggestion { .. } => fill.with_alpha(self.theme.suggestion_alpha),
            _ if visual.block.is_online() => fill.with_alpha(self.theme.online_alpha),
            _ => fill,
        }
    }

    fn draw_unallocated_warning(&self, surface: &mut dyn RenderSurface) {
        let unallocated = self.snapshot.unallocated_mandatory_classes();
        if unallocated.is_empty() {
            return;
        }
        let names: Vec<&str> = unallocated.iter().map(|class| class.name()).collect();
        let (_, height) = surface.size();
        surface.text(
            &format!("Unallocated: {}", names.join(", ")),
            TEXT_INSET,
            height - TEXT_INSET,
            self.theme.label_size,
            self.theme.warn_text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::domain::block::TimetableBlock;
    use crate::domain::class::{Accent, TimetableClass, TimetableOption};
    use crate::domain::core::Rect;
    use crate::domain::Timetable;

    /// Records draw calls so scene composition can be asserted without
    /// rasterizing.
    #[derive(Default)]
    struct Recorder {
        cleared: Option<Rgba>,
        lines: usize,
        fills: Vec<(Rect, Rgba)>,
        strokes: Vec<(Rect, Rgba)>,
        texts: Vec<String>,
    }

    impl RenderSurface for Recorder {
        fn size(&self) -> (f32, f32) {
            (844.0, 628.0)
        }

        fn set_scale(&mut self, _scale: f32) {}

        fn clear(&mut self, color: Rgba) {
            self.cleared = Some(color);
        }

        fn line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _width: f32, _color: Rgba) {
            self.lines += 1;
        }

        fn fill_rect(&mut self, rect: Rect, color: Rgba) {
            self.fills.push((rect, color));
        }

        fn stroke_rect(&mut self, rect: Rect, _width: f32, color: Rgba) {
            self.strokes.push((rect, color));
        }

        fn text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, color: Rgba) {
            let _ = color;
            self.texts.push(text.to_string());
        }
    }

    fn class(name: &str, texts: &[&str], optional: bool) -> TimetableClass {
        TimetableClass::new(
            name,
            "Lecture",
            Accent::Blue,
            vec![TimetableOption::new(
                texts
                    .iter()
                    .map(|t| TimetableBlock::parse(t).unwrap())
                    .collect(),
            )
            .unwrap()],
            optional,
        )
        .unwrap()
    }

    struct Fixture {
        snapshot: TimetableChoices,
        dims: GridDimensions,
        metrics: Metrics,
        visuals: VisualSet,
        scheduler: FrameScheduler,
        theme: Theme,
    }

    fn fixture(classes: Vec<TimetableClass>, select_all: bool) -> Fixture {
        let mut snapshot = TimetableChoices::unselected(Timetable::new(classes));
        if select_all {
            for class in snapshot.timetable().classes().to_vec() {
                let option = class.options()[0].clone();
                snapshot = snapshot.with_choice(&class, Some(&option)).unwrap();
            }
        }
        let dims = GridDimensions::for_timetable(snapshot.timetable(), &LayoutConfig::default());
        let metrics = Metrics::for_canvas(844.0, 628.0, &dims);
        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();
        visuals
            .reconcile(&snapshot, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        Fixture {
            snapshot,
            dims,
            metrics,
            visuals,
            scheduler,
            theme: Theme::default(),
        }
    }

    fn draw(f: &Fixture) -> Recorder {
        let mut recorder = Recorder::default();
        Scene {
            snapshot: &f.snapshot,
            dims: &f.dims,
            metrics: &f.metrics,
            visuals: &f.visuals,
            scheduler: &f.scheduler,
            theme: &f.theme,
            dragging: None,
        }
        .draw(&mut recorder);
        recorder
    }

    #[test]
    fn frame_structure() {
        let f = fixture(vec![class("Algebra", &["mon 9:00 2h"], false)], true);
        let recorder = draw(&f);

        assert_eq!(recorder.cleared, Some(f.theme.background));
        // grid [9, 11) over weekdays: 6 vertical + 3 horizontal lines
        assert_eq!(recorder.lines, 9);
        // one chosen block
        assert_eq!(recorder.fills.len(), 1);
        assert_eq!(recorder.fills[0].1, f.theme.accent(Accent::Blue));
        // headers name the weekdays, gutter names the hours
        assert!(recorder.texts.iter().any(|t| t == "mon"));
        assert!(recorder.texts.iter().any(|t| t == "fri"));
        assert!(recorder.texts.iter().any(|t| t == "9:00"));
        assert!(recorder.texts.iter().any(|t| t == "Algebra"));
    }

    #[test]
    fn clashing_blocks_are_outlined() {
        let f = fixture(
            vec![
                class("Algebra", &["mon 9:00 2h"], false),
                class("Pottery", &["mon 10:00 2h"], false),
            ],
            true,
        );
        let recorder = draw(&f);
        assert_eq!(recorder.strokes.len(), 2);
        assert!(recorder
            .strokes
            .iter()
            .all(|(_, color)| *color == f.theme.clash_outline));
    }

    #[test]
    fn online_blocks_render_translucent() {
        let f = fixture(vec![class("Remote", &["tue 9:00 1h online"], false)], true);
        let recorder = draw(&f);
        assert_eq!(recorder.fills[0].1.a, f.theme.online_alpha);
    }

    #[test]
    fn unallocated_mandatory_classes_are_named() {
        let f = fixture(
            vec![
                class("Algebra", &["mon 9:00 2h"], false),
                class("Pottery", &["tue 9:00 2h"], true),
            ],
            false,
        );
        let recorder = draw(&f);
        // Pottery is optional, so the warning only names Algebra
        assert!(recorder
            .texts
            .iter()
            .any(|t| t == "Unallocated: Algebra"));
    }

    #[test]
    fn no_warning_when_everything_is_allocated() {
        let f = fixture(vec![class("Algebra", &["mon 9:00 2h"], false)], true);
        let recorder = draw(&f);
        assert!(!recorder.texts.iter().any(|t| t.starts_with("Unallocated")));
    }
}
