//! Drag-to-reschedule interaction
//!
//! A two-state pointer protocol over the visual set. Pressing on a primary
//! block starts a drag and materializes suggestion blocks for every block
//! of every option of that block's class; moving the pointer carries the
//! block and highlights the option set under it; releasing either requests
//! the choice change for the suggestion dropped on, or animates the block
//! back to where it came from.
//!
//! The drag layer never mutates the snapshot itself. A successful drop is
//! reported as a `ChoiceRequest` for the application layer to apply.

use crate::config::AnimationConfig;
use crate::domain::core::{Point, Rect};
use crate::domain::TimetableChoices;
use crate::layout::{GridDimensions, LayoutError};
use crate::visual::animation::FrameScheduler;
use crate::visual::blocks::{map_block, Metrics, VisualSet};

/// The choice change a completed drop asks the application to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceRequest {
    pub class_index: usize,
    pub option_index: usize,
}

/// Bookkeeping for one drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// The primary block being carried.
    pub block_id: u64,
    pub class_index: usize,
    /// Pointer offset from the block's top-left corner at grab time.
    pub grab_offset: Point,
    /// The block's rectangle at grab time. A missed drop returns here.
    pub origin: Rect,
}

/// The pointer interaction state machine.
#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Handles a pointer press. Returns true when a drag started.
    ///
    /// A press while a drag is already in progress abandons the old drag
    /// first, exactly as if the pointer had been released over nothing.
    pub fn pointer_down(
        &mut self,
        point: Point,
        snapshot: &TimetableChoices,
        dims: &GridDimensions,
        metrics: &Metrics,
        visuals: &mut VisualSet,
        scheduler: &mut FrameScheduler,
        animation: &AnimationConfig,
    ) -> Result<bool, LayoutError> {
        if self.is_dragging() {
            self.abandon(visuals, scheduler, animation);
        }

        let Some(grabbed) = visuals.primary_at(point) else {
            return Ok(false);
        };
        let origin = grabbed.target_rect();
        let session = DragSession {
            block_id: grabbed.id(),
            class_index: grabbed.class_index,
            grab_offset: Point::new(point.x - origin.x, point.y - origin.y),
            origin,
        };

        Self::materialize_suggestions(session.class_index, snapshot, dims, metrics, visuals)?;

        if let Some(block) = visuals.get_mut(session.block_id) {
            block.drag_position = Some(Point::new(origin.x, origin.y));
        }
        *self = DragState::Dragging(session);
        Ok(true)
    }

    /// Handles pointer motion. Returns true when the scene changed and a
    /// repaint is needed.
    pub fn pointer_move(&mut self, point: Point, visuals: &mut VisualSet) -> bool {
        let DragState::Dragging(session) = self else {
            return false;
        };
        let position = Point::new(point.x - session.grab_offset.x, point.y - session.grab_offset.y);
        let block_id = session.block_id;

        let hovered = visuals.suggestion_at(point).map(|(_, option)| option);
        visuals.highlight_option(hovered);
        if let Some(block) = visuals.get_mut(block_id) {
            block.drag_position = Some(position);
        }
        true
    }

    /// Handles pointer release.
    ///
    /// Releasing over a suggestion yields the choice change to apply;
    /// releasing anywhere else animates the block back to its origin. The
    /// suggestions are cleared either way.
    pub fn pointer_up(
        &mut self,
        point: Point,
        visuals: &mut VisualSet,
        scheduler: &mut FrameScheduler,
        animation: &AnimationConfig,
    ) -> Option<ChoiceRequest> {
        let DragState::Dragging(session) = std::mem::take(self) else {
            return None;
        };

        let dropped_on = visuals
            .suggestion_at(point)
            .map(|(_, option_index)| option_index);
        visuals.clear_suggestions();
        visuals.highlight_option(None);

        match dropped_on {
            Some(option_index) => {
                // leave the block where the pointer dropped it; the
                // reconcile that follows the choice change animates it into
                // its new slot from there
                if let Some(block) = visuals.get_mut(session.block_id) {
                    block.release(scheduler);
                }
                Some(ChoiceRequest {
                    class_index: session.class_index,
                    option_index,
                })
            }
            None => {
                if let Some(block) = visuals.get_mut(session.block_id) {
                    block.return_to(session.origin, animation.snap_back_duration, scheduler);
                }
                None
            }
        }
    }

    /// Abandons the drag in progress, if any, returning the block to its
    /// origin.
    pub fn abandon(
        &mut self,
        visuals: &mut VisualSet,
        scheduler: &mut FrameScheduler,
        animation: &AnimationConfig,
    ) {
        if let DragState::Dragging(session) = std::mem::take(self) {
            visuals.clear_suggestions();
            visuals.highlight_option(None);
            if let Some(block) = visuals.get_mut(session.block_id) {
                block.return_to(session.origin, animation.snap_back_duration, scheduler);
            }
        }
    }

    /// Creates one suggestion block per block per option of the dragged
    /// class. When the class has any multi-block option, suggestions carry
    /// the 1-based option number so the user can tell which blocks would be
    /// scheduled together.
    fn materialize_suggestions(
        class_index: usize,
        snapshot: &TimetableChoices,
        dims: &GridDimensions,
        metrics: &Metrics,
        visuals: &mut VisualSet,
    ) -> Result<(), LayoutError> {
        let class = snapshot.choices()[class_index].class();
        let labelled = class.has_multi_block_options();

        for (option_index, option) in class.options().iter().enumerate() {
            let label = labelled.then_some(option_index + 1);
            for block in option.blocks() {
                let mapping = map_block(block, dims)?;
                let rect = metrics.region_rect(&mapping.primary);
                visuals.add_suggestion(
                    class_index,
                    *block,
                    option_index,
                    label,
                    class.accent(),
                    class.name(),
                    rect,
                );
            }
        }
        Ok(())
    }
}
