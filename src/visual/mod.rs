//! Visual scheduling engine
//!
//! Everything between the domain snapshot and the rendered scene: the
//! frame scheduler and animated transitions, the visual block set with its
//! mapping from domain blocks to grid regions, and the pointer drag state
//! machine.

pub mod animation;
pub mod blocks;
pub mod drag;

pub use animation::{Animation, AnimationError, AnimationId, Easing, FrameScheduler, Transition};
pub use blocks::{map_block, BlockMapping, BlockRegion, Metrics, VisualBlock, VisualKind, VisualSet};
pub use drag::{ChoiceRequest, DragSession, DragState};
