//! The animated cursor: state groups, gesture machine and frame loop glue.
//!
//! A host feeds [`Cursor::handle`] with pointer events and calls
//! [`Cursor::tick`] once per display frame while [`Cursor::wants_frame`] is
//! set. Each tick yields a [`CursorFrame`] for the renderer.
//!
//! ```
//! use tactile_anim::{Cursor, PointerEvent, PointerPosition, StyleTable};
//!
//! let mut cursor = Cursor::new(Default::default(), StyleTable::new());
//! cursor.handle(&PointerEvent::Down { position: PointerPosition::at(10.0, 10.0) });
//!
//! let mut now = 0.0;
//! while cursor.wants_frame() {
//!     let frame = cursor.tick(now);
//!     now += 16.0;
//!     if !frame.changed {
//!         break;
//!     }
//! }
//! assert!((cursor.states().inner.values().scale - 0.9).abs() < 1e-9);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use tactile_config::TactileConfig;
use tracing::trace;

use crate::animation::{CursorStates, GlobalProps, InnerProps, OverlayProps};
use crate::clock::FrameClock;
use crate::interaction::{
    CursorKeyword, CursorProbe, EventKind, EventSource, InteractionMachine, InteractionSettings,
    PointerEvent, Subscription,
};

/// Property values handed to the renderer after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorFrame {
    /// Whether any transition moved this tick.
    pub changed: bool,
    pub global: GlobalProps,
    pub inner: InnerProps,
    pub overlay: OverlayProps,
    /// Native cursor keyword at the last hovered element.
    pub cursor: CursorKeyword,
}

/// Animated cursor.
pub struct Cursor {
    states: CursorStates,
    machine: InteractionMachine,
    clock: FrameClock,
    probe: Box<dyn CursorProbe>,
    current_cursor: CursorKeyword,
    frame_requested: bool,
}

impl Cursor {
    /// Create a cursor at rest. The first frame is requested immediately so the
    /// renderer can draw the initial state.
    pub fn new(settings: InteractionSettings, probe: impl CursorProbe + 'static) -> Self {
        Self {
            states: CursorStates::new(),
            machine: InteractionMachine::new(settings),
            clock: FrameClock::new(),
            probe: Box::new(probe),
            current_cursor: CursorKeyword::Default,
            frame_requested: true,
        }
    }

    pub fn from_config(config: &TactileConfig, probe: impl CursorProbe + 'static) -> Self {
        Self::new(InteractionSettings::from(config), probe)
    }

    pub fn states(&self) -> &CursorStates {
        &self.states
    }

    pub fn machine(&self) -> &InteractionMachine {
        &self.machine
    }

    pub fn current_cursor(&self) -> &CursorKeyword {
        &self.current_cursor
    }

    /// Whether the host should schedule another tick.
    pub fn wants_frame(&self) -> bool {
        self.frame_requested
    }

    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    /// Apply one pointer event.
    pub fn handle(&mut self, event: &PointerEvent) {
        let dirty = match event {
            PointerEvent::Move { position } => self.machine.pointer_move(*position, &mut self.states),
            PointerEvent::Down { position } => self.machine.pointer_down(*position, &mut self.states),
            PointerEvent::Up => self.machine.pointer_up(&mut self.states),
            PointerEvent::Over { target } => {
                if !self.machine.accepts_hover() {
                    return;
                }
                self.current_cursor = self.probe.probe(target);
                trace!(element = %target.0, cursor = %self.current_cursor, "probed cursor");
                self.machine.pointer_over(&self.current_cursor, &mut self.states)
            }
            PointerEvent::DragStart => {
                self.machine.native_drag();
                false
            }
            PointerEvent::DragEnd => self.machine.native_drag_end(&mut self.states),
            PointerEvent::TouchStart | PointerEvent::TouchMove => {
                self.machine.touch();
                false
            }
        };
        if dirty {
            self.request_frame();
        }
    }

    /// Advance all groups to `timestamp_ms` and snapshot the result.
    ///
    /// The frame request stays armed only while something is still moving.
    pub fn tick(&mut self, timestamp_ms: f64) -> CursorFrame {
        let delta = self.clock.delta(timestamp_ms);
        let changed = self.states.advance(delta);
        trace!(delta, changed, "cursor tick");

        self.frame_requested = changed;
        self.snapshot(changed)
    }

    /// Current values without advancing.
    pub fn frame(&self) -> CursorFrame {
        self.snapshot(false)
    }

    fn snapshot(&self, changed: bool) -> CursorFrame {
        CursorFrame {
            changed,
            global: *self.states.global.values(),
            inner: *self.states.inner.values(),
            overlay: *self.states.overlay.values(),
            cursor: self.current_cursor.clone(),
        }
    }

    /// Subscribe a shared cursor to every pointer channel of `source`.
    ///
    /// Handlers hold only a weak reference; once the cursor is dropped they
    /// become no-ops. Stopping or dropping the returned [`Subscription`]
    /// removes them from the source.
    pub fn start(cursor: &Rc<RefCell<Cursor>>, source: Rc<dyn EventSource>) -> Subscription {
        let mut subscription = Subscription::new(source);
        for kind in EventKind::ALL {
            let cursor = Rc::downgrade(cursor);
            subscription.listen(
                kind,
                Box::new(move |event: &PointerEvent| {
                    if let Some(cursor) = cursor.upgrade() {
                        cursor.borrow_mut().handle(event);
                    }
                }),
            );
        }
        subscription
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("states", &self.states)
            .field("machine", &self.machine)
            .field("clock", &self.clock)
            .field("current_cursor", &self.current_cursor)
            .field("frame_requested", &self.frame_requested)
            .finish_non_exhaustive()
    }
}
