//! A single scheduled change of one property.
//!
//! A `Transition` owns its own progress clock. It never writes the property
//! itself: [`Transition::step`] reports the value to apply and the scheduler
//! (see [`AnimatedState::advance`]) writes it into the group.
//!
//! Two lifecycles exist:
//! - **one-shot** transitions are removed from their group once finished;
//! - **persistent** transitions are reset in place (`progress = 0`,
//!   `start = end`) and sit idle until someone moves their `end`.

use std::fmt;

use super::easing::Easing;
use super::interpolate::lerp;
use super::state::{AnimatedState, PropertyBag};

/// Callback run once when a transition reaches its duration.
///
/// It receives the owning group, already holding the transition's final value,
/// and may retarget or push transitions. Anything pushed is first advanced on
/// the next tick.
pub type CompletionFn<B> = Box<dyn FnOnce(&mut AnimatedState<B>)>;

/// Result of advancing a transition's clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStep {
    /// Still in flight; the property should take this value.
    Running(f64),
    /// Reached its duration; the property should take exactly `end`.
    Finished(f64),
}

/// One in-flight change of a single property of a state group.
pub struct Transition<B: PropertyBag> {
    /// Property this transition writes.
    pub target: B::Prop,
    /// Total duration in milliseconds.
    pub duration: f64,
    /// Milliseconds elapsed, `0 <= progress <= duration`.
    pub progress: f64,
    /// Timing curve.
    pub easing: Easing,
    /// Value at `progress = 0`.
    pub start: f64,
    /// Value at `progress = duration`.
    pub end: f64,
    /// Frozen: the scheduler skips it but keeps it in the list.
    pub disabled: bool,
    /// Reset instead of removed on completion.
    pub persistent: bool,
    on_complete: Option<CompletionFn<B>>,
}

impl<B: PropertyBag> Transition<B> {
    /// Create a one-shot transition from `start` to `end`.
    pub fn new(target: B::Prop, start: f64, end: f64, duration: f64, easing: Easing) -> Self {
        Self {
            target,
            duration,
            progress: 0.0,
            easing,
            start,
            end,
            disabled: false,
            persistent: false,
            on_complete: None,
        }
    }

    /// Create a persistent transition resting at `value`.
    pub fn resting(target: B::Prop, value: f64, duration: f64, easing: Easing) -> Self {
        Self {
            persistent: true,
            ..Self::new(target, value, value, duration, easing)
        }
    }

    /// Attach a completion callback.
    pub fn with_on_complete(mut self, on_complete: CompletionFn<B>) -> Self {
        self.on_complete = Some(on_complete);
        self
    }

    /// Whether a completion callback is still pending.
    pub fn has_on_complete(&self) -> bool {
        self.on_complete.is_some()
    }

    /// Whether the clock has not yet reached the duration.
    pub fn is_active(&self) -> bool {
        self.progress < self.duration
    }

    /// Value at the current progress, without advancing.
    ///
    /// Only meaningful while active; a zero-length transition samples as `end`.
    pub fn sample(&self) -> f64 {
        if self.progress >= self.duration {
            return self.end;
        }
        lerp(
            self.start,
            self.end,
            self.easing.evaluate(self.progress / self.duration),
        )
    }

    /// Advance the clock by `delta_ms`.
    ///
    /// On completion `progress` is clamped to `duration` and the exact `end` is
    /// reported, however far the clock overshot. The division in the running
    /// branch cannot see a zero duration.
    pub fn step(&mut self, delta_ms: f64) -> TransitionStep {
        self.progress += delta_ms;
        if self.progress >= self.duration {
            self.progress = self.duration;
            TransitionStep::Finished(self.end)
        } else {
            TransitionStep::Running(self.sample())
        }
    }

    /// Park a finished persistent transition at its end value.
    pub fn rest(&mut self) {
        self.progress = 0.0;
        self.start = self.end;
    }

    pub(crate) fn take_on_complete(&mut self) -> Option<CompletionFn<B>> {
        self.on_complete.take()
    }
}

impl<B: PropertyBag> fmt::Debug for Transition<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("progress", &self.progress)
            .field("easing", &self.easing)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("disabled", &self.disabled)
            .field("persistent", &self.persistent)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::state::{InnerProp, InnerProps};

    fn scale(start: f64, end: f64, duration: f64) -> Transition<InnerProps> {
        Transition::new(InnerProp::Scale, start, end, duration, Easing::CubicOut)
    }

    #[test]
    fn test_step_running_then_finished() {
        let mut transition = scale(1.0, 0.9, 800.0);

        match transition.step(400.0) {
            TransitionStep::Running(v) => {
                let expected = lerp(1.0, 0.9, Easing::CubicOut.evaluate(0.5));
                assert_eq!(v, expected);
            }
            other => panic!("expected running, got {other:?}"),
        }
        assert!(transition.is_active());

        assert_eq!(transition.step(400.0), TransitionStep::Finished(0.9));
        assert_eq!(transition.progress, 800.0);
        assert!(!transition.is_active());
    }

    #[test]
    fn test_overshooting_delta_clamps_progress() {
        let mut transition = scale(1.0, 0.9, 500.0);
        assert_eq!(transition.step(700.0), TransitionStep::Finished(0.9));
        assert_eq!(transition.progress, 500.0);
    }

    #[test]
    fn test_zero_duration_finishes_on_zero_delta() {
        let mut transition = scale(0.0, 1.0, 0.0);
        assert_eq!(transition.step(0.0), TransitionStep::Finished(1.0));
    }

    #[test]
    fn test_rest_parks_at_end() {
        let mut transition = Transition::<InnerProps>::resting(
            InnerProp::Scale,
            1.0,
            150.0,
            Easing::HalfCosineEase,
        );
        assert!(transition.persistent);
        transition.end = 2.0;
        transition.step(150.0);
        transition.rest();
        assert_eq!(transition.start, 2.0);
        assert_eq!(transition.progress, 0.0);
    }

    #[test]
    fn test_completion_taken_once() {
        let mut transition = scale(0.0, 1.0, 10.0)
            .with_on_complete(Box::new(|_: &mut AnimatedState<InnerProps>| {}));
        assert!(transition.has_on_complete());
        assert!(transition.take_on_complete().is_some());
        assert!(transition.take_on_complete().is_none());
    }
}
