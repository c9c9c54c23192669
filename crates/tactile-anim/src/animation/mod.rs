//! Property tweening for the cursor's visual state.
//!
//! This module provides:
//! - **Easing**: the named timing curves (some overshoot on purpose)
//! - **Transitions**: one timed change of one property, one-shot or persistent
//! - **State groups**: closed property bags plus their transition lists
//! - **Scheduling**: per-frame advancement with in-place retirement
//! - **Requests**: declarative "animate these properties" batches
//!
//! # Architecture
//!
//! ```text
//! CursorStates
//!   ├── global  AnimatedState<GlobalProps>   [base persistent rotate, ...]
//!   ├── inner   AnimatedState<InnerProps>    [...]
//!   └── overlay AnimatedState<OverlayProps>  [...]
//!
//! AnimationRequest ──enqueue──▶ AnimatedState ──advance(delta)──▶ values
//! ```

pub mod easing;
pub mod interpolate;
pub mod request;
pub mod scheduler;
pub mod state;
pub mod transition;

pub use easing::Easing;
pub use interpolate::lerp;
pub use request::{AnimationRequest, TargetValue};
pub use state::{
    AnimatedState, BASE_ROTATE_DURATION_MS, CursorStates, GlobalProp, GlobalProps, InnerProp,
    InnerProps, OverlayProp, OverlayProps, PropertyBag,
};
pub use transition::{CompletionFn, Transition, TransitionStep};
