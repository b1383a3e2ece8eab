//! Slot-based animation scheduling with completion callbacks.
//!
//! An [`Animator`] owns a fixed number of slots. Each slot holds at most one
//! running [`Animation`], an elapsed-time counter that starts negative while
//! the start delay runs, and an optional one-shot completion callback.
//! Animations mutate their target only when ticked, so they never hold
//! references into it.

use std::fmt;

/// Number of slots per animator.
pub const MAX_ANIMATIONS: usize = 4;

/// Slot for primary transitions.
pub const SLOT_PRIMARY: usize = 0;

/// Slot for secondary effects.
pub const SLOT_SECONDARY: usize = 1;

// =============================================================================
// Easing
// =============================================================================

/// Easing curves used by transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Quadratic ease in
    QuadIn,
    /// Cubic ease out (slow end)
    CubicOut,
    /// Hermite smoothstep
    SmoothStep,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            Self::SmoothStep => t * t * 2.0f32.mul_add(-t, 3.0),
        }
    }
}

/// Linear interpolation between two scalars.
#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from).mul_add(t, from)
}

// =============================================================================
// Animations
// =============================================================================

/// A progress function with a fixed duration.
///
/// `apply` receives progress in `[0, 1]` (already reversed when the slot
/// was started in reverse).
pub trait Animation<T> {
    /// Duration in milliseconds. `0` completes on the first tick.
    fn duration_ms(&self) -> u32;

    /// Apply progress `t` to the target.
    fn apply(&mut self, target: &mut T, t: f32);
}

/// An animation built from a closure.
pub struct LambdaAnimation<T> {
    duration_ms: u32,
    func: Box<dyn FnMut(&mut T, f32)>,
}

impl<T> LambdaAnimation<T> {
    /// Create an animation that calls `func` with each progress value.
    pub fn new(duration_ms: u32, func: impl FnMut(&mut T, f32) + 'static) -> Self {
        Self {
            duration_ms,
            func: Box::new(func),
        }
    }
}

impl<T> Animation<T> for LambdaAnimation<T> {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn apply(&mut self, target: &mut T, t: f32) {
        (self.func)(target, t);
    }
}

impl<T> fmt::Debug for LambdaAnimation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaAnimation")
            .field("duration_ms", &self.duration_ms)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Animator
// =============================================================================

/// One-shot completion callback. Receives the updated target and the
/// animator so it can chain a follow-up animation.
pub type FinishedCallback<T> = Box<dyn FnOnce(&mut T, &mut Animator<T>)>;

struct Slot<T> {
    animation: Box<dyn Animation<T>>,
    elapsed_ms: i64,
    reverse: bool,
    on_finished: Option<FinishedCallback<T>>,
}

/// Fixed-slot animation scheduler.
pub struct Animator<T> {
    slots: [Option<Slot<T>>; MAX_ANIMATIONS],
}

impl<T> Default for Animator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Animator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let playing: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        f.debug_struct("Animator")
            .field("playing", &playing)
            .finish()
    }
}

impl<T> Animator<T> {
    /// Create an animator with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Install an animation into `slot`, dropping whatever was there without
    /// running its callback.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= MAX_ANIMATIONS`.
    pub fn set_animation(
        &mut self,
        slot: usize,
        animation: Box<dyn Animation<T>>,
        delay_ms: u32,
        on_finished: Option<FinishedCallback<T>>,
        reverse: bool,
    ) {
        assert!(slot < MAX_ANIMATIONS, "animation slot {slot} out of range");
        self.slots[slot] = Some(Slot {
            animation,
            elapsed_ms: -i64::from(delay_ms),
            reverse,
            on_finished,
        });
    }

    /// Drop the animation in `slot` without running its callback.
    pub fn cancel(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = None;
        }
    }

    /// Drop every animation without running callbacks.
    pub fn cancel_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Whether `slot` holds an animation (including one still in its delay).
    #[must_use]
    pub fn is_playing(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(Option::is_some)
    }

    /// Whether any slot holds an animation.
    #[must_use]
    pub fn is_any_playing(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// Advance every occupied slot by `delta_ms`.
    pub fn update(&mut self, target: &mut T, delta_ms: u32) {
        for slot in 0..MAX_ANIMATIONS {
            self.advance(slot, target, delta_ms);
        }
    }

    /// Advance a single slot by `time_ms`, completing it if it runs out.
    pub fn advance(&mut self, slot: usize, target: &mut T, time_ms: u32) {
        let Some(Some(state)) = self.slots.get_mut(slot) else {
            return;
        };

        state.elapsed_ms += i64::from(time_ms);
        if state.elapsed_ms < 0 {
            return;
        }

        let duration = state.animation.duration_ms();
        let t = if duration == 0 {
            1.0
        } else {
            (state.elapsed_ms as f32 / duration as f32).min(1.0)
        };
        let progress = if state.reverse { 1.0 - t } else { t };
        state.animation.apply(target, progress);

        if t >= 1.0 {
            self.complete(slot, target);
        }
    }

    /// Jump `slot` to its end state and run its callback.
    pub fn finish(&mut self, slot: usize, target: &mut T) {
        let Some(Some(state)) = self.slots.get_mut(slot) else {
            return;
        };
        let end = if state.reverse { 0.0 } else { 1.0 };
        state.animation.apply(target, end);
        self.complete(slot, target);
    }

    fn complete(&mut self, slot: usize, target: &mut T) {
        // clear before the callback so it may reuse the slot
        if let Some(Slot {
            on_finished: Some(callback),
            ..
        }) = self.slots[slot].take()
        {
            callback(target, self);
        }
    }
}
