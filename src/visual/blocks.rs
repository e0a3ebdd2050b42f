//! Visual block mapping and lifecycle
//!
//! Maps domain blocks onto one or two rectangular regions of the grid
//! (two when a block crosses the column's day boundary), and maintains the
//! set of on-screen visual blocks across snapshot changes: primary blocks
//! are reused and animated to their new coordinates wherever a positional
//! 1:1 correspondence exists, overflow blocks are always recreated, and
//! blocks of vanished classes are removed outright.

use crate::domain::block::TimetableBlock;
use crate::domain::class::Accent;
use crate::domain::core::{Point, Rect};
use crate::domain::TimetableChoices;
use crate::layout::{GridDimensions, LayoutError};
use crate::visual::animation::{FrameScheduler, Transition};

/// A block's footprint on the grid: a column plus fractional-hour top and
/// bottom rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRegion {
    pub col: usize,
    pub top: f32,
    pub bottom: f32,
}

/// Where a block lands on the grid. `overflow` is present when the block
/// continues past the bottom of its day column into the next day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMapping {
    pub primary: BlockRegion,
    pub overflow: Option<BlockRegion>,
}

/// Computes the visual region(s) for one block.
///
/// A block whose end lies beyond the bottom of its day column is split into
/// a primary region running to the grid's bottom edge and an overflow
/// region starting at the grid's top edge in the next day's column.
pub fn map_block(
    block: &TimetableBlock,
    dims: &GridDimensions,
) -> Result<BlockMapping, LayoutError> {
    let start = dims.time_location(block.day(), block.start_time())?;
    let end_row = block.end_time().fractional_hour48() - dims.start_hour() as f32;

    if end_row > dims.bottom_row() {
        let overflow_col = dims.column_of(block.day().succ())?;
        Ok(BlockMapping {
            primary: BlockRegion {
                col: start.col,
                top: start.row,
                bottom: dims.bottom_row(),
            },
            overflow: Some(BlockRegion {
                col: overflow_col,
                top: 0.0,
                bottom: end_row - 24.0,
            }),
        })
    } else {
        Ok(BlockMapping {
            primary: BlockRegion {
                col: start.col,
                top: start.row,
                bottom: end_row,
            },
            overflow: None,
        })
    }
}

/// Pixel geometry of the grid on the current surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub origin_x: f32,
    pub origin_y: f32,
    pub col_width: f32,
    pub row_height: f32,
}

impl Metrics {
    /// Width of the hour-label gutter on the left.
    pub const GUTTER_WIDTH: f32 = 44.0;
    /// Height of the day-header strip on top.
    pub const HEADER_HEIGHT: f32 = 28.0;

    /// Fits the grid into a surface of the given size.
    pub fn for_canvas(width: f32, height: f32, dims: &GridDimensions) -> Self {
        let usable_w = (width - Self::GUTTER_WIDTH).max(1.0);
        let usable_h = (height - Self::HEADER_HEIGHT).max(1.0);
        Self {
            origin_x: Self::GUTTER_WIDTH,
            origin_y: Self::HEADER_HEIGHT,
            col_width: usable_w / dims.day_count().max(1) as f32,
            row_height: usable_h / dims.hour_count().max(1) as f32,
        }
    }

    /// Pixel rectangle of a grid region.
    pub fn region_rect(&self, region: &BlockRegion) -> Rect {
        Rect::new(
            self.origin_x + region.col as f32 * self.col_width,
            self.origin_y + region.top * self.row_height,
            self.col_width,
            (region.bottom - region.top) * self.row_height,
        )
    }

    /// Pixel x of a column's left edge.
    pub fn column_x(&self, col: usize) -> f32 {
        self.origin_x + col as f32 * self.col_width
    }

    /// Pixel y of a row offset from the grid top.
    pub fn row_y(&self, row: f32) -> f32 {
        self.origin_y + row * self.row_height
    }
}

/// What a visual block represents on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    /// A block of the currently chosen option.
    Primary,
    /// The continuation of a primary block in the next day's column.
    Overflow,
    /// A drop target shown while dragging: one block of one of the class's
    /// options. `label` is the 1-based option number, shown when the class
    /// has multi-block options.
    Suggestion {
        option_index: usize,
        label: Option<usize>,
    },
}

/// One on-screen rectangle for a block, with animated coordinates.
///
/// The x position and the top and bottom y positions animate independently;
/// the width follows the column width and snaps.
#[derive(Debug, Clone)]
pub struct VisualBlock {
    id: u64,
    pub class_index: usize,
    pub block: TimetableBlock,
    pub kind: VisualKind,
    pub accent: Accent,
    pub caption: String,
    pub highlighted: bool,
    /// While dragging, the rectangle follows this top-left position instead
    /// of its transitions.
    pub drag_position: Option<Point>,
    x: Transition,
    top: Transition,
    bottom: Transition,
    width: f32,
}

impl VisualBlock {
    fn snapped(
        id: u64,
        class_index: usize,
        block: TimetableBlock,
        kind: VisualKind,
        accent: Accent,
        caption: &str,
        rect: Rect,
    ) -> Self {
        Self {
            id,
            class_index,
            block,
            kind,
            accent,
            caption: caption.to_string(),
            highlighted: false,
            drag_position: None,
            x: Transition::fixed(rect.x),
            top: Transition::fixed(rect.y),
            bottom: Transition::fixed(rect.bottom()),
            width: rect.w,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The rectangle the block is heading toward. Hit-testing uses this so
    /// interaction stays deterministic while animations are in flight.
    pub fn target_rect(&self) -> Rect {
        Rect::new(
            self.x.target(),
            self.top.target(),
            self.width,
            self.bottom.target() - self.top.target(),
        )
    }

    /// The rectangle to draw this frame: the animated coordinates, or the
    /// drag override while the block follows the pointer.
    pub fn current_rect(&self, scheduler: &FrameScheduler) -> Rect {
        if let Some(position) = self.drag_position {
            return self.target_rect().at(position);
        }
        let top = self.top.value(scheduler);
        Rect::new(
            self.x.value(scheduler),
            top,
            self.width,
            self.bottom.value(scheduler) - top,
        )
    }

    fn retarget_to(&mut self, rect: Rect, duration: f32, scheduler: &mut FrameScheduler) {
        self.width = rect.w;
        self.x.retarget(rect.x, duration, scheduler);
        self.top.retarget(rect.y, duration, scheduler);
        self.bottom.retarget(rect.bottom(), duration, scheduler);
    }

    /// Releases a drag override, snapping the animated coordinates to where
    /// the pointer left the block so a following retarget continues from
    /// there.
    pub fn release(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(position) = self.drag_position.take() {
            let height = self.bottom.target() - self.top.target();
            self.x.snap(position.x, scheduler);
            self.top.snap(position.y, scheduler);
            self.bottom.snap(position.y + height, scheduler);
        }
    }

    /// Animates the block back toward the given rectangle, releasing any
    /// drag override first.
    pub fn return_to(&mut self, rect: Rect, duration: f32, scheduler: &mut FrameScheduler) {
        self.release(scheduler);
        self.retarget_to(rect, duration, scheduler);
    }
}

/// The set of visual blocks currently on screen.
#[derive(Debug, Default)]
pub struct VisualSet {
    blocks: Vec<VisualBlock>,
    next_id: u64,
}

impl VisualSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: u64) -> Option<&VisualBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut VisualBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Rebuilds the visual set against a new snapshot and layout.
    ///
    /// Primary blocks are matched positionally per class (classes tracked
    /// by name across snapshots) and animated to their new coordinates over
    /// `duration` seconds (pass zero to snap, e.g. after a resize); surplus
    /// blocks are deleted and deficits created. Overflow blocks carry no
    /// identity and are recreated.
    /// Suggestion blocks are cleared; a snapshot change always ends the
    /// drag that produced them.
    pub fn reconcile(
        &mut self,
        snapshot: &TimetableChoices,
        dims: &GridDimensions,
        metrics: &Metrics,
        duration: f32,
        scheduler: &mut FrameScheduler,
    ) -> Result<(), LayoutError> {
        // Survivors follow their class by name: blocks of classes no longer
        // in the timetable go away, blocks of classes that moved in the
        // list carry their identity to the class's new position.
        let classes = snapshot.timetable().classes();
        self.blocks.retain_mut(|b| {
            if !matches!(b.kind, VisualKind::Primary) {
                return false;
            }
            match classes.iter().position(|c| c.name() == b.caption) {
                Some(index) => {
                    b.class_index = index;
                    true
                }
                None => false,
            }
        });

        let mut keep: Vec<u64> = Vec::new();
        let mut created: Vec<VisualBlock> = Vec::new();

        for (class_index, choice) in snapshot.choices().iter().enumerate() {
            let class = choice.class();
            let chosen: &[TimetableBlock] = choice
                .option()
                .map(|option| option.blocks())
                .unwrap_or(&[]);

            let existing: Vec<usize> = self
                .blocks
                .iter()
                .enumerate()
                .filter(|(_, b)| b.class_index == class_index)
                .map(|(i, _)| i)
                .collect();

            for (slot, block) in chosen.iter().enumerate() {
                let mapping = map_block(block, dims)?;
                let rect = metrics.region_rect(&mapping.primary);

                if let Some(&index) = existing.get(slot) {
                    let visual = &mut self.blocks[index];
                    visual.block = *block;
                    visual.accent = class.accent();
                    visual.caption = class.name().to_string();
                    visual.highlighted = false;
                    visual.drag_position = None;
                    visual.retarget_to(rect, duration, scheduler);
                    keep.push(visual.id);
                } else {
                    let id = self.allocate_id();
                    keep.push(id);
                    created.push(VisualBlock::snapped(
                        id,
                        class_index,
                        *block,
                        VisualKind::Primary,
                        class.accent(),
                        class.name(),
                        rect,
                    ));
                }

                if let Some(overflow) = mapping.overflow {
                    let rect = metrics.region_rect(&overflow);
                    let id = self.allocate_id();
                    keep.push(id);
                    created.push(VisualBlock::snapped(
                        id,
                        class_index,
                        *block,
                        VisualKind::Overflow,
                        class.accent(),
                        class.name(),
                        rect,
                    ));
                }
            }
        }

        self.blocks.retain(|b| keep.contains(&b.id));
        self.blocks.extend(created);
        Ok(())
    }

    /// Materializes one suggestion block.
    pub fn add_suggestion(
        &mut self,
        class_index: usize,
        block: TimetableBlock,
        option_index: usize,
        label: Option<usize>,
        accent: Accent,
        caption: &str,
        rect: Rect,
    ) -> u64 {
        let id = self.allocate_id();
        self.blocks.push(VisualBlock::snapped(
            id,
            class_index,
            block,
            VisualKind::Suggestion {
                option_index,
                label,
            },
            accent,
            caption,
            rect,
        ));
        id
    }

    pub fn clear_suggestions(&mut self) {
        self.blocks
            .retain(|b| !matches!(b.kind, VisualKind::Suggestion { .. }));
    }

    /// Highlights every suggestion belonging to `option_index` (so a
    /// multi-block option lights up as a set) and unhighlights the rest.
    pub fn highlight_option(&mut self, option_index: Option<usize>) {
        for block in &mut self.blocks {
            block.highlighted = match block.kind {
                VisualKind::Suggestion { option_index: o, .. } => Some(o) == option_index,
                _ => false,
            };
        }
    }

    /// The topmost primary block under the pointer, by target bounds.
    /// Primary z-order puts the first-created block on top.
    pub fn primary_at(&self, point: Point) -> Option<&VisualBlock> {
        let mut primaries: Vec<&VisualBlock> = self
            .blocks
            .iter()
            .filter(|b| matches!(b.kind, VisualKind::Primary))
            .collect();
        primaries.sort_by_key(|b| b.id);
        primaries
            .into_iter()
            .find(|b| b.target_rect().contains(point))
    }

    /// The topmost suggestion block under the pointer, with its option
    /// index. Later-created suggestions draw on top, so search newest
    /// first.
    pub fn suggestion_at(&self, point: Point) -> Option<(&VisualBlock, usize)> {
        let mut suggestions: Vec<&VisualBlock> = self
            .blocks
            .iter()
            .filter(|b| matches!(b.kind, VisualKind::Suggestion { .. }))
            .collect();
        suggestions.sort_by_key(|b| std::cmp::Reverse(b.id));
        suggestions.into_iter().find_map(|b| match b.kind {
            VisualKind::Suggestion { option_index, .. }
                if b.target_rect().contains(point) =>
            {
                Some((b, option_index))
            }
            _ => None,
        })
    }

    /// Blocks in drawing order: primaries back-to-front in reverse creation
    /// order (first-created on top), then overflows, then suggestions, and
    /// the actively dragged block last of all.
    pub fn draw_order(&self, dragging: Option<u64>) -> Vec<&VisualBlock> {
        let mut order: Vec<&VisualBlock> = Vec::with_capacity(self.blocks.len());
        let group = |kind: &VisualKind| match kind {
            VisualKind::Primary => 0,
            VisualKind::Overflow => 1,
            VisualKind::Suggestion { .. } => 2,
        };

        let mut sorted: Vec<&VisualBlock> = self
            .blocks
            .iter()
            .filter(|b| Some(b.id) != dragging)
            .collect();
        sorted.sort_by(|a, b| {
            group(&a.kind).cmp(&group(&b.kind)).then_with(|| {
                if matches!(a.kind, VisualKind::Primary) {
                    b.id.cmp(&a.id) // reverse creation order
                } else {
                    a.id.cmp(&b.id)
                }
            })
        });
        order.extend(sorted);

        if let Some(id) = dragging {
            if let Some(block) = self.get(id) {
                order.push(block);
            }
        }
        order
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::domain::class::{TimetableClass, TimetableOption};
    use crate::domain::Timetable;

    fn class(name: &str, options: &[&[&str]]) -> TimetableClass {
        TimetableClass::new(
            name,
            "Lecture",
            Accent::Blue,
            options
                .iter()
                .map(|texts| {
                    TimetableOption::new(
                        texts
                            .iter()
                            .map(|t| TimetableBlock::parse(t).unwrap())
                            .collect(),
                    )
                    .unwrap()
                })
                .collect(),
            false,
        )
        .unwrap()
    }

    fn setup(classes: Vec<TimetableClass>) -> (TimetableChoices, GridDimensions, Metrics) {
        let snapshot = TimetableChoices::unselected(Timetable::new(classes));
        let dims = GridDimensions::for_timetable(snapshot.timetable(), &LayoutConfig::default());
        let metrics = Metrics::for_canvas(844.0, 628.0, &dims);
        (snapshot, dims, metrics)
    }

    #[test]
    fn daytime_block_maps_to_one_region() {
        let (_, dims, _) = setup(vec![class("A", &[&["mon 9:00 2h"]])]);
        let block = TimetableBlock::parse("mon 9:00 2h").unwrap();
        let mapping = map_block(&block, &dims).unwrap();
        assert_eq!(mapping.overflow, None);
        assert_eq!(mapping.primary.col, 0);
        assert_eq!(mapping.primary.top, 0.0);
        assert_eq!(mapping.primary.bottom, 2.0);
    }

    #[test]
    fn overnight_block_splits_into_primary_and_overflow() {
        // grid [1, 25): the Friday block ends at 26:00, past the bottom edge
        let (_, dims, _) = setup(vec![
            class("Early", &[&["mon 1:00 1h"]]),
            class("Late", &[&["fri 23:00 3h"]]),
        ]);
        let block = TimetableBlock::parse("fri 23:00 3h").unwrap();
        let mapping = map_block(&block, &dims).unwrap();

        let primary = mapping.primary;
        assert_eq!(primary.col, 4); // Friday
        assert_eq!(primary.top, 22.0);
        assert_eq!(primary.bottom, dims.bottom_row()); // clipped at the grid bottom

        let overflow = mapping.overflow.expect("block must overflow");
        assert_eq!(overflow.col, 5); // Saturday
        assert_eq!(overflow.top, 0.0); // starts at the grid top
        assert_eq!(overflow.bottom, 1.0); // 26:00 is one hour past the boundary
    }

    #[test]
    fn anchored_overnight_block_stays_whole() {
        // grid [3, 27): the same block fits inside Friday's column
        let (_, dims, _) = setup(vec![
            class("Late", &[&["fri 23:00 3h"]]),
            class("Day", &[&["mon 9:00 1h"]]),
        ]);
        let block = TimetableBlock::parse("fri 23:00 3h").unwrap();
        let mapping = map_block(&block, &dims).unwrap();
        assert_eq!(mapping.overflow, None);
        assert_eq!(mapping.primary.top, 20.0);
        assert_eq!(mapping.primary.bottom, 23.0);
    }

    #[test]
    fn metrics_region_rect() {
        let (_, dims, metrics) = setup(vec![class("A", &[&["mon 9:00 2h"]])]);
        // canvas 844x628 minus 44 gutter and 28 header: 160 per column,
        // 300 per hour for the two-hour grid
        assert_eq!(metrics.col_width, 160.0);
        assert_eq!(metrics.row_height, 300.0);
        let rect = metrics.region_rect(&BlockRegion {
            col: 1,
            top: 0.5,
            bottom: 1.5,
        });
        assert_eq!(rect, Rect::new(204.0, 178.0, 160.0, 300.0));
        assert_eq!(dims.hour_count(), 2);
    }

    #[test]
    fn reconcile_creates_blocks_for_chosen_options() {
        let (snapshot, dims, metrics) = setup(vec![class(
            "A",
            &[&["mon 9:00 1h"], &["mon 9:00 1h", "wed 14:00 1h"]],
        )]);
        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();

        // nothing chosen yet: no blocks
        visuals
            .reconcile(&snapshot, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        assert!(visuals.is_empty());

        let a = snapshot.timetable().classes()[0].clone();
        let pair = a.options()[1].clone();
        let chosen = snapshot.with_choice(&a, Some(&pair)).unwrap();
        let dims = GridDimensions::for_timetable(chosen.timetable(), &LayoutConfig::default());
        let metrics = Metrics::for_canvas(844.0, 628.0, &dims);
        visuals
            .reconcile(&chosen, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        assert_eq!(visuals.len(), 2);
    }

    #[test]
    fn reconcile_reuses_blocks_positionally() {
        let (snapshot, dims, metrics) = setup(vec![class(
            "A",
            &[&["mon 9:00 1h"], &["tue 10:00 1h"]],
        )]);
        let a = snapshot.timetable().classes()[0].clone();
        let first = a.options()[0].clone();
        let second = a.options()[1].clone();

        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();
        let chosen = snapshot.with_choice(&a, Some(&first)).unwrap();
        visuals
            .reconcile(&chosen, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        let id = visuals.draw_order(None)[0].id();

        // switching options retargets the same visual block
        let chosen = snapshot.with_choice(&a, Some(&second)).unwrap();
        visuals
            .reconcile(&chosen, &dims, &metrics, 0.3, &mut scheduler)
            .unwrap();
        assert_eq!(visuals.len(), 1);
        let reused = visuals.get(id).expect("block identity preserved");
        assert_eq!(reused.block, second.blocks()[0]);
        assert!(scheduler.has_active());

        // clearing the choice deletes the surplus block
        visuals
            .reconcile(&snapshot, &dims, &metrics, 0.3, &mut scheduler)
            .unwrap();
        assert!(visuals.is_empty());
    }

    #[test]
    fn reconcile_drops_vanished_classes() {
        let (snapshot, dims, metrics) = setup(vec![
            class("A", &[&["mon 9:00 1h"]]),
            class("B", &[&["tue 9:00 1h"]]),
        ]);
        let a = snapshot.timetable().classes()[0].clone();
        let b = snapshot.timetable().classes()[1].clone();
        let both = snapshot
            .with_choice(&a, Some(&a.options()[0].clone()))
            .unwrap()
            .with_choice(&b, Some(&b.options()[0].clone()))
            .unwrap();

        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();
        visuals
            .reconcile(&both, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        assert_eq!(visuals.len(), 2);

        let without = both.without_class(&b).unwrap();
        let dims = GridDimensions::for_timetable(without.timetable(), &LayoutConfig::default());
        let metrics = Metrics::for_canvas(844.0, 628.0, &dims);
        visuals
            .reconcile(&without, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        assert_eq!(visuals.len(), 1);
        assert_eq!(visuals.draw_order(None)[0].caption, "A");
    }

    #[test]
    fn removing_the_first_class_keeps_the_survivors_blocks() {
        let (snapshot, dims, metrics) = setup(vec![
            class("A", &[&["mon 9:00 1h"]]),
            class("B", &[&["tue 9:00 1h"]]),
        ]);
        let a = snapshot.timetable().classes()[0].clone();
        let b = snapshot.timetable().classes()[1].clone();
        let both = snapshot
            .with_choice(&a, Some(&a.options()[0].clone()))
            .unwrap()
            .with_choice(&b, Some(&b.options()[0].clone()))
            .unwrap();

        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();
        visuals
            .reconcile(&both, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        let b_id = visuals
            .draw_order(None)
            .iter()
            .find(|v| v.caption == "B")
            .unwrap()
            .id();

        // removing A shifts B to index 0; B must keep its own visual and
        // A's must go away instead of being reused as B's carrier
        let without = both.without_class(&a).unwrap();
        visuals
            .reconcile(&without, &dims, &metrics, 0.3, &mut scheduler)
            .unwrap();
        assert_eq!(visuals.len(), 1);
        let survivor = visuals.get(b_id).expect("B keeps its visual identity");
        assert_eq!(survivor.caption, "B");
        assert_eq!(survivor.class_index, 0);
        // B did not move, so nothing animates
        assert!(!scheduler.has_active());
    }

    #[test]
    fn suggestions_highlight_as_a_set() {
        let (_, _, metrics) = setup(vec![class("A", &[&["mon 9:00 1h"]])]);
        let block = TimetableBlock::parse("mon 9:00 1h").unwrap();
        let other = TimetableBlock::parse("wed 14:00 1h").unwrap();
        let rect = metrics.region_rect(&BlockRegion {
            col: 0,
            top: 0.0,
            bottom: 1.0,
        });

        let mut visuals = VisualSet::new();
        visuals.add_suggestion(0, block, 0, None, Accent::Blue, "A", rect);
        visuals.add_suggestion(0, block, 1, Some(1), Accent::Blue, "A", rect);
        visuals.add_suggestion(0, other, 1, Some(1), Accent::Blue, "A", rect);

        visuals.highlight_option(Some(1));
        let highlighted: Vec<bool> = visuals.draw_order(None).iter().map(|b| b.highlighted).collect();
        assert_eq!(highlighted, vec![false, true, true]);

        visuals.highlight_option(None);
        assert!(visuals.draw_order(None).iter().all(|b| !b.highlighted));

        visuals.clear_suggestions();
        assert!(visuals.is_empty());
    }

    #[test]
    fn draw_order_layers_kinds_and_defers_the_dragged_block() {
        let (snapshot, dims, metrics) = setup(vec![
            class("A", &[&["mon 9:00 1h"]]),
            class("B", &[&["tue 9:00 1h"]]),
        ]);
        let a = snapshot.timetable().classes()[0].clone();
        let b = snapshot.timetable().classes()[1].clone();
        let both = snapshot
            .with_choice(&a, Some(&a.options()[0].clone()))
            .unwrap()
            .with_choice(&b, Some(&b.options()[0].clone()))
            .unwrap();

        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();
        visuals
            .reconcile(&both, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();
        let first_id = visuals.draw_order(None).last().unwrap().id();

        let rect = metrics.region_rect(&BlockRegion {
            col: 0,
            top: 0.0,
            bottom: 1.0,
        });
        let block = TimetableBlock::parse("mon 9:00 1h").unwrap();
        visuals.add_suggestion(0, block, 0, None, Accent::Blue, "A", rect);

        // primaries draw in reverse creation order, so the first-created
        // primary draws last within its group (topmost)
        let order = visuals.draw_order(None);
        assert!(matches!(order[0].kind, VisualKind::Primary));
        assert!(matches!(order[1].kind, VisualKind::Primary));
        assert_eq!(order[1].id(), first_id);
        assert!(matches!(order[2].kind, VisualKind::Suggestion { .. }));

        // the dragged block always draws last
        let order = visuals.draw_order(Some(first_id));
        assert_eq!(order.last().unwrap().id(), first_id);
    }

    #[test]
    fn hit_testing_uses_target_bounds() {
        let (snapshot, dims, metrics) = setup(vec![class("A", &[&["mon 9:00 2h"]])]);
        let a = snapshot.timetable().classes()[0].clone();
        let chosen = snapshot
            .with_choice(&a, Some(&a.options()[0].clone()))
            .unwrap();

        let mut scheduler = FrameScheduler::new();
        let mut visuals = VisualSet::new();
        visuals
            .reconcile(&chosen, &dims, &metrics, 0.0, &mut scheduler)
            .unwrap();

        let rect = visuals.draw_order(None)[0].target_rect();
        let inside = Point::new(rect.x + 1.0, rect.y + 1.0);
        assert!(visuals.primary_at(inside).is_some());
        let outside = Point::new(rect.right() + 1.0, rect.y);
        assert!(visuals.primary_at(outside).is_none());
        assert!(visuals.suggestion_at(inside).is_none());
    }
}
