//! Application controller and coordination layer
//!
//! The controller owns the current snapshot and the visual state derived
//! from it, and orchestrates between pointer input, the domain, the layout
//! engine and the renderer. Every mutation goes through the same path:
//! build the new snapshot, recompute the grid, reconcile the visual set,
//! request a frame.

use log::{debug, info};
use thiserror::Error;

use crate::config::{AnimationConfig, LayoutConfig, Theme};
use crate::domain::class::{TimetableClass, TimetableOption};
use crate::domain::core::Point;
use crate::domain::error::DomainError;
use crate::domain::TimetableChoices;
use crate::io;
use crate::layout::{GridDimensions, LayoutError};
use crate::render::scene::Scene;
use crate::render::surface::RenderSurface;
use crate::visual::animation::FrameScheduler;
use crate::visual::blocks::{Metrics, VisualSet};
use crate::visual::drag::DragState;

/// Errors surfaced through the controller.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl PlannerError {
    /// A message suitable for showing to the user, when the failure is one
    /// the user can fix.
    pub fn user_message(&self) -> Option<String> {
        match self {
            PlannerError::Domain(e) => e.user_message(),
            PlannerError::Layout(_) => None,
        }
    }
}

/// The interactive timetable planner.
pub struct PlannerController {
    snapshot: TimetableChoices,
    layout: LayoutConfig,
    animation: AnimationConfig,
    theme: Theme,
    canvas: (f32, f32),
    dims: GridDimensions,
    metrics: Metrics,
    visuals: VisualSet,
    scheduler: FrameScheduler,
    drag: DragState,
}

impl PlannerController {
    /// Creates a controller for a snapshot on a canvas of the given logical
    /// size.
    pub fn new(
        snapshot: TimetableChoices,
        layout: LayoutConfig,
        animation: AnimationConfig,
        theme: Theme,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Result<Self, PlannerError> {
        let layout = layout.sanitized();
        let dims = GridDimensions::for_timetable(snapshot.timetable(), &layout);
        let metrics = Metrics::for_canvas(canvas_width, canvas_height, &dims);

        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();
        visuals.reconcile(&snapshot, &dims, &metrics, 0.0, &mut scheduler)?;
        scheduler.force_frame();

        info!(
            "planner started: {} classes, grid {}..{}",
            snapshot.timetable().len(),
            dims.start_hour(),
            dims.end_hour()
        );
        Ok(Self {
            snapshot,
            layout,
            animation,
            theme,
            canvas: (canvas_width, canvas_height),
            dims,
            metrics,
            visuals,
            scheduler,
            drag: DragState::default(),
        })
    }

    pub fn snapshot(&self) -> &TimetableChoices {
        &self.snapshot
    }

    pub fn dims(&self) -> &GridDimensions {
        &self.dims
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Installs a new snapshot wholesale, animating blocks that survive the
    /// change into their new places.
    pub fn replace_snapshot(&mut self, snapshot: TimetableChoices) -> Result<(), PlannerError> {
        self.apply(snapshot)
    }

    /// Replaces the choice for one class.
    pub fn set_choice(
        &mut self,
        class: &TimetableClass,
        option: Option<&TimetableOption>,
    ) -> Result<(), PlannerError> {
        let snapshot = self.snapshot.with_choice(class, option)?;
        info!("choice changed for {:?}", class.name());
        self.apply(snapshot)
    }

    /// Adds a new class with no option selected.
    pub fn add_class(&mut self, class: TimetableClass) -> Result<(), PlannerError> {
        let snapshot = self.snapshot.with_class(class.clone(), None)?;
        info!("class added: {:?}", class.name());
        self.apply(snapshot)
    }

    /// Replaces `old` with `edited`, carrying the choice over when the
    /// chosen option still exists.
    pub fn edit_class(
        &mut self,
        edited: TimetableClass,
        old: &TimetableClass,
    ) -> Result<(), PlannerError> {
        let snapshot = self.snapshot.with_class(edited, Some(old))?;
        info!("class edited: {:?}", old.name());
        self.apply(snapshot)
    }

    /// Removes a class and its choice.
    pub fn remove_class(&mut self, class: &TimetableClass) -> Result<(), PlannerError> {
        let snapshot = self.snapshot.without_class(class)?;
        info!("class removed: {:?}", class.name());
        self.apply(snapshot)
    }

    /// Serializes the current snapshot to the JSON document form.
    pub fn to_json(&self) -> Result<String, PlannerError> {
        Ok(io::to_json(&self.snapshot)?)
    }

    /// Loads a JSON document, replacing the current snapshot.
    pub fn load_json(&mut self, input: &str) -> Result<(), PlannerError> {
        let snapshot = io::from_json(input)?;
        info!("snapshot loaded: {} classes", snapshot.timetable().len());
        self.apply(snapshot)
    }

    /// Handles a pointer press. Returns true when a drag started.
    pub fn pointer_down(&mut self, point: Point) -> Result<bool, PlannerError> {
        let started = self.drag.pointer_down(
            point,
            &self.snapshot,
            &self.dims,
            &self.metrics,
            &mut self.visuals,
            &mut self.scheduler,
            &self.animation,
        )?;
        if started {
            debug!("drag started at ({}, {})", point.x, point.y);
            self.scheduler.force_frame();
        }
        Ok(started)
    }

    /// Handles pointer motion.
    pub fn pointer_move(&mut self, point: Point) {
        if self.drag.pointer_move(point, &mut self.visuals) {
            self.scheduler.force_frame();
        }
    }

    /// Handles pointer release, applying the requested choice change when
    /// the drop landed on a suggestion.
    pub fn pointer_up(&mut self, point: Point) -> Result<(), PlannerError> {
        let request =
            self.drag
                .pointer_up(point, &mut self.visuals, &mut self.scheduler, &self.animation);
        self.scheduler.force_frame();

        let Some(request) = request else {
            return Ok(());
        };
        let class = self.snapshot.timetable().classes()[request.class_index].clone();
        let option = class.options()[request.option_index].clone();
        debug!(
            "drop reassigns {:?} to option {}",
            class.name(),
            request.option_index
        );
        self.set_choice(&class, Some(&option))
    }

    /// Adopts a new canvas size, snapping every block to its recomputed
    /// place.
    pub fn resize(&mut self, canvas_width: f32, canvas_height: f32) -> Result<(), PlannerError> {
        self.canvas = (canvas_width, canvas_height);
        self.metrics = Metrics::for_canvas(canvas_width, canvas_height, &self.dims);
        self.visuals
            .reconcile(&self.snapshot, &self.dims, &self.metrics, 0.0, &mut self.scheduler)?;
        self.scheduler.force_frame();
        Ok(())
    }

    /// Advances animations by `dt` seconds. Returns true while animations
    /// remain in flight and the host should keep driving frames.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.scheduler.tick(dt);
        self.scheduler.has_active()
    }

    /// True when the scene changed since the last `advance` and a repaint
    /// is due.
    pub fn needs_frame(&self) -> bool {
        self.scheduler.is_frame_pending() || self.scheduler.has_active()
    }

    /// Draws the current frame.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        Scene {
            snapshot: &self.snapshot,
            dims: &self.dims,
            metrics: &self.metrics,
            visuals: &self.visuals,
            scheduler: &self.scheduler,
            theme: &self.theme,
            dragging: self.drag.session().map(|session| session.block_id),
        }
        .draw(surface);
    }

    /// The shared mutation path: abandon any drag, recompute the grid for
    /// the new timetable, reconcile the visual set and request a frame.
    fn apply(&mut self, snapshot: TimetableChoices) -> Result<(), PlannerError> {
        self.drag
            .abandon(&mut self.visuals, &mut self.scheduler, &self.animation);

        self.snapshot = snapshot;
        self.dims = GridDimensions::for_timetable(self.snapshot.timetable(), &self.layout);
        self.metrics = Metrics::for_canvas(self.canvas.0, self.canvas.1, &self.dims);
        self.visuals.reconcile(
            &self.snapshot,
            &self.dims,
            &self.metrics,
            self.animation.move_duration,
            &mut self.scheduler,
        )?;
        self.scheduler.force_frame();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::block::TimetableBlock;
    use crate::domain::class::Accent;
    use crate::domain::core::Rect;
    use crate::domain::Timetable;
    use crate::render::surface::Rgba;

    /// Counts draw calls; controller tests only care that rendering runs.
    #[derive(Default)]
    struct CountingSurface {
        fills: usize,
    }

    impl RenderSurface for CountingSurface {
        fn size(&self) -> (f32, f32) {
            (844.0, 628.0)
        }
        fn set_scale(&mut self, _scale: f32) {}
        fn clear(&mut self, _color: Rgba) {}
        fn line(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _color: Rgba) {}
        fn fill_rect(&mut self, _rect: Rect, _color: Rgba) {
            self.fills += 1;
        }
        fn stroke_rect(&mut self, _rect: Rect, _: f32, _color: Rgba) {}
        fn text(&mut self, _: &str, _: f32, _: f32, _: f32, _color: Rgba) {}
    }

    fn tin_opening() -> TimetableClass {
        let single = TimetableOption::single(TimetableBlock::parse("mon 9:00 2h").unwrap());
        let pair = TimetableOption::new(vec![
            TimetableBlock::parse("mon 9:00 2h").unwrap(),
            TimetableBlock::parse("wed 14:00 1h").unwrap(),
        ])
        .unwrap();
        TimetableClass::new(
            "Tin Opening 101",
            "Lecture",
            Accent::Teal,
            vec![single, pair],
            false,
        )
        .unwrap()
    }

    fn controller(selected: Option<usize>) -> PlannerController {
        let class = tin_opening();
        let snapshot = match selected {
            None => TimetableChoices::unselected(Timetable::new(vec![class])),
            Some(i) => {
                let option = class.options()[i].clone();
                TimetableChoices::unselected(Timetable::new(vec![class.clone()]))
                    .with_choice(&class, Some(&option))
                    .unwrap()
            }
        };
        PlannerController::new(
            snapshot,
            LayoutConfig::default(),
            AnimationConfig::default(),
            Theme::default(),
            844.0,
            628.0,
        )
        .unwrap()
    }

    /// A point inside the grid cell of a block, using the controller's own
    /// geometry.
    fn cell_point(c: &PlannerController, text: &str) -> Point {
        let block = TimetableBlock::parse(text).unwrap();
        let mapping =
            crate::visual::blocks::map_block(&block, c.dims()).unwrap();
        let rect = c.metrics().region_rect(&mapping.primary);
        Point::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)
    }

    #[test]
    fn drag_onto_a_suggestion_reassigns_the_class() {
        // option 0 (monday only) is chosen; dragging the monday block onto
        // the wednesday suggestion switches to the two-block option
        let mut c = controller(Some(0));
        let grab = cell_point(&c, "mon 9:00 2h");
        let drop = cell_point(&c, "wed 14:00 1h");

        assert!(c.pointer_down(grab).unwrap());
        c.pointer_move(drop);
        c.pointer_up(drop).unwrap();

        let class = tin_opening();
        assert_eq!(
            c.snapshot().chosen_option(&class).unwrap(),
            Some(&class.options()[1])
        );
        // the reassignment animates the block toward its new slot
        assert!(c.needs_frame());
        assert!(c.advance(0.016));
        assert!(!c.advance(10.0));
    }

    #[test]
    fn missed_drop_keeps_the_choice_and_snaps_back() {
        let mut c = controller(Some(0));
        let grab = cell_point(&c, "mon 9:00 2h");

        assert!(c.pointer_down(grab).unwrap());
        let nowhere = Point::new(grab.x, 10000.0);
        c.pointer_move(nowhere);
        c.pointer_up(nowhere).unwrap();

        let class = tin_opening();
        assert_eq!(
            c.snapshot().chosen_option(&class).unwrap(),
            Some(&class.options()[0])
        );
        assert!(c.advance(0.016)); // snap-back in flight
    }

    #[test]
    fn press_outside_any_block_does_not_drag() {
        let mut c = controller(Some(0));
        assert!(!c.pointer_down(Point::new(1.0, 1.0)).unwrap());
    }

    #[test]
    fn set_choice_rejects_unknown_classes() {
        let mut c = controller(None);
        let stranger = TimetableClass::new(
            "Stranger",
            "Lecture",
            Accent::Red,
            vec![TimetableOption::single(
                TimetableBlock::parse("fri 9:00 1h").unwrap(),
            )],
            false,
        )
        .unwrap();
        let result = c.set_choice(&stranger, None);
        assert!(matches!(
            result,
            Err(PlannerError::Domain(DomainError::UnknownClass(_)))
        ));
        // referencing a class that is not there is a caller bug, not a
        // user-facing condition
        assert!(result.unwrap_err().user_message().is_none());
    }

    #[test]
    fn class_edits_flow_through_the_grid() {
        let mut c = controller(None);
        let evening = TimetableClass::new(
            "Astronomy",
            "Lecture",
            Accent::Purple,
            vec![TimetableOption::single(
                TimetableBlock::parse("sat 21:00 2h").unwrap(),
            )],
            false,
        )
        .unwrap();

        c.add_class(evening.clone()).unwrap();
        // a saturday class widens the grid to seven columns
        assert_eq!(c.dims().day_count(), 7);

        c.remove_class(&evening).unwrap();
        assert_eq!(c.dims().day_count(), 5);
    }

    #[test]
    fn json_round_trip_through_the_controller() {
        let mut c = controller(Some(1));
        let json = c.to_json().unwrap();

        let mut other = controller(None);
        other.load_json(&json).unwrap();
        assert_eq!(other.snapshot(), c.snapshot());

        assert!(matches!(
            c.load_json("{"),
            Err(PlannerError::Domain(DomainError::MalformedDocument(_)))
        ));
    }

    #[test]
    fn resize_recomputes_geometry_without_animating() {
        let mut c = controller(Some(0));
        let before = c.metrics().col_width;
        c.advance(10.0); // drain startup animations

        c.resize(444.0, 628.0).unwrap();
        assert_ne!(c.metrics().col_width, before);
        assert!(c.needs_frame());
        assert!(!c.advance(0.016)); // snapped, nothing in flight
    }

    #[test]
    fn render_draws_the_chosen_blocks() {
        let c = controller(Some(1));
        let mut surface = CountingSurface::default();
        c.render(&mut surface);
        assert_eq!(surface.fills, 2);
    }
}
