//! Pointer input handling: event types, the gesture state machine, native
//! cursor probing and event-source subscriptions.

pub mod input;
pub mod machine;
pub mod probe;
pub mod rotation;
pub mod subscription;

pub use input::{EventKind, Point, PointerEvent, PointerPosition, TargetId};
pub use machine::{
    DragState, InteractionMachine, InteractionSettings, deg_to_rad, spin_back_duration,
};
pub use probe::{CursorKeyword, CursorProbe, StyleTable};
pub use rotation::{RotationTracker, unwrap_angle};
pub use subscription::{EventBus, EventSource, Handler, ListenerId, Subscription};
