//! Animated cursor engine.
//!
//! `tactile-anim` drives a custom on-screen cursor made of three independently
//! animated groups (`global`, `inner`, `overlay`) and a pointer gesture state
//! machine that turns presses, drags and hovers into property transitions.
//!
//! The crate is renderer-agnostic. A host feeds pointer events into a
//! [`Cursor`], ticks it from its display-refresh callback and draws the
//! resulting [`CursorFrame`].
//!
//! Everything here is single-threaded: state is shared through `Rc`/`RefCell`
//! and handlers run synchronously on the thread that dispatches events.

pub mod animation;
pub mod clock;
pub mod cursor;
pub mod interaction;

pub use animation::{
    AnimatedState, AnimationRequest, CursorStates, Easing, GlobalProp, GlobalProps, InnerProp,
    InnerProps, OverlayProp, OverlayProps, PropertyBag, TargetValue, Transition, lerp,
};
pub use clock::FrameClock;
pub use cursor::{Cursor, CursorFrame};
pub use interaction::{
    CursorKeyword, CursorProbe, DragState, EventBus, EventKind, EventSource, InteractionMachine,
    InteractionSettings, Point, PointerEvent, PointerPosition, StyleTable, Subscription, TargetId,
};
