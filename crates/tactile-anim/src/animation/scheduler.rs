//! Per-frame transition scheduling.
//!
//! [`AnimatedState::advance`] moves every transition of a group forward by
//! the frame delta and writes the resulting values into the group's bag.
//!
//! The list is walked from the back. A one-shot transition that finishes is
//! removed on the spot, which never disturbs the indices still to be visited.
//! Completion callbacks run with the whole group borrowed mutably; anything
//! they push lands past the starting index and is first advanced next tick.

use tracing::trace;

use super::state::{AnimatedState, PropertyBag};
use super::transition::TransitionStep;

impl<B: PropertyBag> AnimatedState<B> {
    /// Advance all transitions by `delta_ms`.
    ///
    /// Returns `true` if at least one transition was stepped. Disabled
    /// transitions, and persistent ones already resting at the property's
    /// current value, are skipped and do not count as a change.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        let mut changed = false;
        let mut index = self.transitions.len();

        while index > 0 {
            index -= 1;

            // A completion callback may have shortened the list.
            let Some(transition) = self.transitions.get_mut(index) else {
                continue;
            };
            if transition.disabled {
                continue;
            }
            let target = transition.target;
            if transition.persistent && transition.end == self.values.get(target) {
                continue;
            }

            match transition.step(delta_ms) {
                TransitionStep::Running(value) => {
                    self.values.set(target, value);
                }
                TransitionStep::Finished(value) => {
                    self.values.set(target, value);
                    let persistent = transition.persistent;
                    let on_complete = transition.take_on_complete();

                    trace!(group = B::GROUP, ?target, value, "transition finished");
                    if let Some(on_complete) = on_complete {
                        on_complete(self);
                    }
                    self.retire(index, persistent);
                }
            }

            changed = true;
        }

        changed
    }

    fn retire(&mut self, index: usize, persistent: bool) {
        if persistent {
            if let Some(transition) = self.transitions.get_mut(index) {
                transition.rest();
            }
        } else if index < self.transitions.len() {
            self.transitions.remove(index);
        }
    }
}
