//! Timed animations and animated scalar transitions
//!
//! An `Animation` is a finite progression from 0 to 1 over a duration in
//! seconds, advanced once per rendered frame by the elapsed wall-clock
//! delta. A `Transition` wraps one scalar (a coordinate component) moving
//! toward a target value through an easing function. The `FrameScheduler`
//! owns all active animations and the explicit "is a frame already queued"
//! coalescing flag; it is driven by the host's frame callback.

use std::collections::HashMap;

use thiserror::Error;

/// Handle to an animation registered with the scheduler.
pub type AnimationId = u64;

/// Animation bookkeeping errors. These indicate programming mistakes, not
/// user input problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// `cancel` was called for an id the scheduler does not know.
    #[error("animation {0} is not registered with the scheduler")]
    UnknownAnimation(AnimationId),
}

/// Easing functions applied to animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOutCubic,
    EaseOutCubic,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A finite, time-driven progression from 0 to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    delay: f32,
    duration: f32,
    elapsed: f32,
}

impl Animation {
    pub fn new(duration: f32) -> Self {
        Self::with_delay(duration, 0.0)
    }

    /// An animation that holds at 0 for `delay` seconds before starting.
    pub fn with_delay(duration: f32, delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advances by an elapsed wall-clock delta in seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.elapsed < self.delay {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            ((self.elapsed - self.delay) / self.duration).min(1.0)
        }
    }

    /// Done once the elapsed time reaches the delay plus duration.
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

/// Owns the set of active animations and the frame-coalescing flag.
///
/// The host drives this: it calls `tick` from its frame callback with the
/// elapsed delta, and keeps scheduling frames while `has_active` reports
/// true. `request_frame` coalesces redundant redraw requests; `force_frame`
/// is for resizes and immediate state changes that must repaint regardless.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    animations: HashMap<AnimationId, Animation>,
    next_id: AnimationId,
    frame_pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an animation and returns its handle.
    pub fn start(&mut self, animation: Animation) -> AnimationId {
        let id = self.next_id;
        self.next_id += 1;
        self.animations.insert(id, animation);
        id
    }

    /// True while the animation is registered (it is removed once done).
    pub fn contains(&self, id: AnimationId) -> bool {
        self.animations.contains_key(&id)
    }

    /// Linear progress of a registered animation.
    pub fn progress_of(&self, id: AnimationId) -> Option<f32> {
        self.animations.get(&id).map(Animation::progress)
    }

    /// Cancels a registered animation outright. Canceling an id that is not
    /// registered is a programming error and reported as such.
    pub fn cancel(&mut self, id: AnimationId) -> Result<(), AnimationError> {
        match self.animations.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AnimationError::UnknownAnimation(id)),
        }
    }

    /// Removes an animation if it is still registered. Used by transitions
    /// when retargeting, where the previous animation may have legitimately
    /// finished and been retired already.
    pub(crate) fn discard(&mut self, id: AnimationId) {
        self.animations.remove(&id);
    }

    /// Advances every animation by `dt` seconds, retires finished ones and
    /// clears the pending-frame flag (the frame is being rendered now).
    pub fn tick(&mut self, dt: f32) {
        self.frame_pending = false;
        for animation in self.animations.values_mut() {
            animation.advance(dt);
        }
        self.animations.retain(|_, animation| !animation.is_done());
    }

    /// True while any animation is in flight; the host keeps scheduling
    /// frames until this goes false.
    pub fn has_active(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Requests a redraw. Returns false when a frame is already pending, so
    /// at most one frame is queued at a time.
    pub fn request_frame(&mut self) -> bool {
        if self.frame_pending {
            false
        } else {
            self.frame_pending = true;
            true
        }
    }

    /// Marks a frame pending unconditionally, for resizes and immediate
    /// state changes that bypass coalescing.
    pub fn force_frame(&mut self) {
        self.frame_pending = true;
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }
}

/// An animated scalar moving toward a target value.
///
/// Changing the target starts a new animation from the transition's current
/// (possibly mid-animation) displayed value and cancels the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    start: f32,
    target: f32,
    easing: Easing,
    animation: Option<AnimationId>,
}

impl Transition {
    /// A transition resting at `value` with no animation.
    pub fn fixed(value: f32) -> Self {
        Self {
            start: value,
            target: value,
            easing: Easing::default(),
            animation: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// The displayed value: the easing function applied to the animation's
    /// progress, mapped linearly from the start value to the target. Once
    /// the animation has been retired the value rests at the target.
    pub fn value(&self, scheduler: &FrameScheduler) -> f32 {
        match self.animation.and_then(|id| scheduler.progress_of(id)) {
            Some(progress) => {
                self.start + (self.target - self.start) * self.easing.apply(progress)
            }
            None => self.target,
        }
    }

    pub fn is_animating(&self, scheduler: &FrameScheduler) -> bool {
        self.animation.is_some_and(|id| scheduler.contains(id))
    }

    /// Places the transition at `value` immediately, canceling any
    /// animation in flight.
    pub fn snap(&mut self, value: f32, scheduler: &mut FrameScheduler) {
        if let Some(id) = self.animation.take() {
            scheduler.discard(id);
        }
        self.start = value;
        self.target = value;
    }

    /// Starts animating from the current displayed value toward `target`
    /// over `duration` seconds, canceling any animation in flight.
    pub fn retarget(&mut self, target: f32, duration: f32, scheduler: &mut FrameScheduler) {
        let current = self.value(scheduler);
        if let Some(id) = self.animation.take() {
            scheduler.discard(id);
        }
        if duration <= 0.0 || (target - current).abs() < f32::EPSILON {
            self.start = target;
            self.target = target;
            return;
        }
        self.start = current;
        self.target = target;
        self.animation = Some(scheduler.start(Animation::new(duration)));
    }
}
