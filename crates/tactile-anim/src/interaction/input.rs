//! Pointer input types delivered to the cursor.

use serde::{Deserialize, Serialize};

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer location as reported by the platform.
///
/// `page` is document-relative; `scroll` is the viewport's scroll offset at the
/// time of the event. Their difference is stable while the page scrolls under
/// a held pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub page: Point,
    #[serde(default)]
    pub scroll: Point,
}

impl PointerPosition {
    /// Position with no scroll offset.
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            page: Point::new(x, y),
            scroll: Point::new(0.0, 0.0),
        }
    }

    /// Viewport-relative position.
    pub fn client(&self) -> Point {
        Point::new(self.page.x - self.scroll.x, self.page.y - self.scroll.y)
    }
}

/// Opaque reference to the element under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Pointer and touch input consumed by the cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Move { position: PointerPosition },
    Down { position: PointerPosition },
    Up,
    /// Pointer entered an element.
    Over { target: TargetId },
    /// A native drag is in progress (fires repeatedly).
    DragStart,
    DragEnd,
    TouchStart,
    TouchMove,
}

impl PointerEvent {
    /// Listener kind this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Move { .. } => EventKind::Move,
            Self::Down { .. } => EventKind::Down,
            Self::Up => EventKind::Up,
            Self::Over { .. } => EventKind::Over,
            Self::DragStart => EventKind::Drag,
            Self::DragEnd => EventKind::DragEnd,
            Self::TouchStart => EventKind::TouchStart,
            Self::TouchMove => EventKind::TouchMove,
        }
    }
}

/// Listener channels a cursor subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Move,
    Over,
    Down,
    TouchStart,
    TouchMove,
    Up,
    Drag,
    DragEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::Move,
        EventKind::Over,
        EventKind::Down,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::Up,
        EventKind::Drag,
        EventKind::DragEnd,
    ];
}
