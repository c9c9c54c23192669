//! Declarative animation requests.
//!
//! An [`AnimationRequest`] describes "animate these properties to these
//! values over this long with this curve" and turns into one transition per
//! property when enqueued. Enqueueing only appends: callers that want to
//! interrupt whatever is running clear the group first.
//!
//! # Example
//!
//! ```
//! use tactile_anim::animation::{
//!     AnimatedState, AnimationRequest, Easing, InnerProp, InnerProps,
//! };
//!
//! let mut inner = AnimatedState::new(InnerProps::default());
//! AnimationRequest::new(800.0, Easing::CubicOut)
//!     .to(InnerProp::Scale, 0.9)
//!     .enqueue(&mut inner);
//!
//! assert_eq!(inner.transitions().len(), 1);
//! assert_eq!(inner.transitions()[0].start, 1.0);
//! ```

use super::easing::Easing;
use super::state::{AnimatedState, PropertyBag};
use super::transition::{CompletionFn, Transition};

/// Destination of one property in a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetValue {
    /// Animate from the property's current value.
    To(f64),
    /// Animate from an explicit start value.
    FromTo(f64, f64),
}

impl From<f64> for TargetValue {
    fn from(end: f64) -> Self {
        Self::To(end)
    }
}

impl From<[f64; 2]> for TargetValue {
    fn from([start, end]: [f64; 2]) -> Self {
        Self::FromTo(start, end)
    }
}

/// A batch of transitions sharing one duration, curve and completion callback.
pub struct AnimationRequest<B: PropertyBag> {
    duration: f64,
    easing: Easing,
    targets: Vec<(B::Prop, TargetValue)>,
    on_complete: Option<CompletionFn<B>>,
}

impl<B: PropertyBag> AnimationRequest<B> {
    /// Start a request with the given duration (ms) and curve.
    pub fn new(duration: f64, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            targets: Vec::new(),
            on_complete: None,
        }
    }

    /// Add a property destination.
    pub fn target(mut self, prop: B::Prop, value: impl Into<TargetValue>) -> Self {
        self.targets.push((prop, value.into()));
        self
    }

    /// Animate `prop` from its current value to `end`.
    pub fn to(self, prop: B::Prop, end: f64) -> Self {
        self.target(prop, TargetValue::To(end))
    }

    /// Animate `prop` from `start` to `end`.
    pub fn from_to(self, prop: B::Prop, start: f64, end: f64) -> Self {
        self.target(prop, TargetValue::FromTo(start, end))
    }

    /// Run `on_complete` when the request's first transition finishes.
    pub fn on_complete(mut self, on_complete: impl FnOnce(&mut AnimatedState<B>) + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Push one transition per target onto `state`, in request order.
    ///
    /// Only the first transition carries the completion callback.
    pub fn enqueue(self, state: &mut AnimatedState<B>) {
        let mut on_complete = self.on_complete;
        for (prop, value) in self.targets {
            let (start, end) = match value {
                TargetValue::To(end) => (state.get(prop), end),
                TargetValue::FromTo(start, end) => (start, end),
            };
            let mut transition = Transition::new(prop, start, end, self.duration, self.easing);
            if let Some(callback) = on_complete.take() {
                transition = transition.with_on_complete(callback);
            }
            state.push(transition);
        }
    }
}

impl<B: PropertyBag> AnimatedState<B> {
    /// Enqueue a request on this group.
    pub fn animate(&mut self, request: AnimationRequest<B>) {
        request.enqueue(self);
    }
}
