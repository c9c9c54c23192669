//! Angular accumulation for rotate gestures.

use std::cell::Cell;
use std::f64::consts::{PI, TAU};
use std::rc::Rc;

/// Fold an angle difference into `[-π, π]`.
///
/// Uses a truncating remainder, so the sign of the input is kept before the
/// half-turn correction.
pub fn unwrap_angle(diff: f64) -> f64 {
    let mut diff = diff % TAU;
    if diff < -PI {
        diff += TAU;
    }
    if diff > PI {
        diff -= TAU;
    }
    diff
}

/// Accumulated rotation of the current press gesture.
///
/// `accumulated` is unbounded: dragging around the press point twice yields
/// roughly `4π`, not `0`.
#[derive(Debug, Clone, Default)]
pub struct RotationTracker {
    accumulated: f64,
    /// Shared with the release animation's completion callback.
    completing: Rc<Cell<bool>>,
}

impl RotationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwrapped radians turned so far.
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Whether the release spring-back is still running.
    pub fn is_completing(&self) -> bool {
        self.completing.get()
    }

    /// Start a new gesture.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Move towards the raw angle `radians` by the shortest way round and
    /// return the new accumulated angle.
    pub fn track(&mut self, radians: f64) -> f64 {
        self.accumulated += unwrap_angle(radians - self.accumulated);
        self.accumulated
    }

    /// Mark the release animation as running.
    pub fn begin_completion(&self) {
        self.completing.set(true);
    }

    /// Mark the release animation as over without it having completed.
    pub fn end_completion(&self) {
        self.completing.set(false);
    }

    /// Handle the release animation's callback uses to clear the flag.
    pub fn completion_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.completing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_unwrap_wraps_nearly_full_turn() {
        assert!((unwrap_angle(TAU - 0.1) + 0.1).abs() < EPSILON);
        assert!((unwrap_angle(-(TAU - 0.1)) - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_unwrap_keeps_small_angles() {
        assert_eq!(unwrap_angle(0.5), 0.5);
        assert_eq!(unwrap_angle(-0.5), -0.5);
        assert_eq!(unwrap_angle(PI), PI);
    }

    #[test]
    fn test_unwrap_multiple_turns() {
        assert!((unwrap_angle(3.0 * TAU + 0.25) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_track_from_three_radians() {
        let mut tracker = RotationTracker::new();
        tracker.track(3.0);
        assert_eq!(tracker.accumulated(), 3.0);

        // Raw difference of 2π - 0.1 is really a small step backwards.
        let raw = 3.0 + TAU - 0.1;
        tracker.track(raw);
        assert!((tracker.accumulated() - 2.9).abs() < EPSILON);
    }

    #[test]
    fn test_track_accumulates_past_half_turn() {
        let mut tracker = RotationTracker::new();
        for step in 1..=8 {
            // Raw angles as atan2 would report them: always within (-π, π].
            let raw = unwrap_angle(step as f64 * PI / 2.0);
            tracker.track(raw);
        }
        assert!((tracker.accumulated() - 4.0 * PI).abs() < EPSILON);
    }

    #[test]
    fn test_completion_flag_is_shared() {
        let tracker = RotationTracker::new();
        let flag = tracker.completion_flag();
        tracker.begin_completion();
        assert!(tracker.is_completing());
        flag.set(false);
        assert!(!tracker.is_completing());
    }

    #[test]
    fn test_end_completion_clears_shared_flag() {
        let tracker = RotationTracker::new();
        let flag = tracker.completion_flag();
        tracker.begin_completion();
        tracker.end_completion();
        assert!(!tracker.is_completing());
        assert!(!flag.get());
    }

    #[test]
    fn test_reset_keeps_completion() {
        let mut tracker = RotationTracker::new();
        tracker.track(1.0);
        tracker.begin_completion();
        tracker.reset();
        assert_eq!(tracker.accumulated(), 0.0);
        assert!(tracker.is_completing());
    }
}
