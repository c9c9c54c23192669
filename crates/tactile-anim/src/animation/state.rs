//! Animated state groups.
//!
//! A group is a small, closed bag of `f64` properties plus the ordered list of
//! transitions writing into it. Property names are per-group enums, so a
//! transition can only ever target a property its group actually has.
//!
//! The cursor uses three groups:
//!
//! ```text
//! global  { scale, rotate }   whole-cursor transform (rotate in radians)
//! inner   { scale }           press squish of the cursor body
//! overlay { opacity }         additive glow layer
//! ```

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::transition::Transition;

/// A closed set of animatable properties.
pub trait PropertyBag: Clone + Debug + 'static {
    /// Property names of this bag.
    type Prop: Copy + Eq + Debug + 'static;

    /// Group name used in log output.
    const GROUP: &'static str;

    /// Read a property.
    fn get(&self, prop: Self::Prop) -> f64;

    /// Write a property.
    fn set(&mut self, prop: Self::Prop, value: f64);
}

/// Properties of the `global` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalProp {
    Scale,
    Rotate,
}

/// Whole-cursor transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalProps {
    pub scale: f64,
    /// Radians, clockwise.
    pub rotate: f64,
}

impl Default for GlobalProps {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotate: 0.0,
        }
    }
}

impl PropertyBag for GlobalProps {
    type Prop = GlobalProp;
    const GROUP: &'static str = "global";

    fn get(&self, prop: GlobalProp) -> f64 {
        match prop {
            GlobalProp::Scale => self.scale,
            GlobalProp::Rotate => self.rotate,
        }
    }

    fn set(&mut self, prop: GlobalProp, value: f64) {
        match prop {
            GlobalProp::Scale => self.scale = value,
            GlobalProp::Rotate => self.rotate = value,
        }
    }
}

/// Properties of the `inner` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnerProp {
    Scale,
}

/// Press scale of the cursor body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InnerProps {
    pub scale: f64,
}

impl Default for InnerProps {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl PropertyBag for InnerProps {
    type Prop = InnerProp;
    const GROUP: &'static str = "inner";

    fn get(&self, prop: InnerProp) -> f64 {
        match prop {
            InnerProp::Scale => self.scale,
        }
    }

    fn set(&mut self, prop: InnerProp, value: f64) {
        match prop {
            InnerProp::Scale => self.scale = value,
        }
    }
}

/// Properties of the `overlay` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayProp {
    Opacity,
}

/// Glow layer; opacity is not clamped here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayProps {
    pub opacity: f64,
}

impl Default for OverlayProps {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

impl PropertyBag for OverlayProps {
    type Prop = OverlayProp;
    const GROUP: &'static str = "overlay";

    fn get(&self, prop: OverlayProp) -> f64 {
        match prop {
            OverlayProp::Opacity => self.opacity,
        }
    }

    fn set(&mut self, prop: OverlayProp, value: f64) {
        match prop {
            OverlayProp::Opacity => self.opacity = value,
        }
    }
}

/// A property bag and the transitions animating it.
///
/// Transition order matters: the scheduler walks the list back to front, so
/// when two transitions write the same property in one tick the one with the
/// lower index is applied last and wins.
#[derive(Debug)]
pub struct AnimatedState<B: PropertyBag> {
    pub(crate) values: B,
    pub(crate) transitions: Vec<Transition<B>>,
}

impl<B: PropertyBag + Default> Default for AnimatedState<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: PropertyBag> AnimatedState<B> {
    /// Create a group with no transitions.
    pub fn new(values: B) -> Self {
        Self {
            values,
            transitions: Vec::new(),
        }
    }

    /// Current property values.
    pub fn values(&self) -> &B {
        &self.values
    }

    /// Read one property.
    pub fn get(&self, prop: B::Prop) -> f64 {
        self.values.get(prop)
    }

    /// Write one property directly, bypassing any transition.
    pub fn set(&mut self, prop: B::Prop, value: f64) {
        self.values.set(prop, value);
    }

    /// Transitions in application order.
    pub fn transitions(&self) -> &[Transition<B>] {
        &self.transitions
    }

    /// Append a transition.
    pub fn push(&mut self, transition: Transition<B>) {
        self.transitions.push(transition);
    }

    /// Drop every transition, freezing properties at their current values.
    pub fn clear_transitions(&mut self) {
        self.transitions.clear();
    }

    /// Replace the whole transition list.
    pub fn replace_transitions(&mut self, transitions: Vec<Transition<B>>) {
        self.transitions = transitions;
    }

    /// Keep only the first `len` transitions.
    pub fn truncate_transitions(&mut self, len: usize) {
        self.transitions.truncate(len);
    }

    /// The standing transition at index 0, if any.
    pub fn base(&self) -> Option<&Transition<B>> {
        self.transitions.first()
    }

    /// Mutable access to the standing transition at index 0.
    pub fn base_mut(&mut self) -> Option<&mut Transition<B>> {
        self.transitions.first_mut()
    }

    /// Whether nothing is scheduled.
    pub fn is_idle(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Duration of the standing rotation tracker in the `global` group.
pub const BASE_ROTATE_DURATION_MS: f64 = 150.0;

/// The three groups making up the cursor's visual state.
#[derive(Debug)]
pub struct CursorStates {
    pub global: AnimatedState<GlobalProps>,
    pub inner: AnimatedState<InnerProps>,
    pub overlay: AnimatedState<OverlayProps>,
}

impl Default for CursorStates {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorStates {
    /// Initial cursor state.
    ///
    /// `global` starts with a persistent rotate transition at index 0. Gestures
    /// steer the rotation by moving its `end`.
    pub fn new() -> Self {
        let mut global = AnimatedState::new(GlobalProps::default());
        global.push(Transition::resting(
            GlobalProp::Rotate,
            0.0,
            BASE_ROTATE_DURATION_MS,
            Easing::HalfCosineEase,
        ));

        Self {
            global,
            inner: AnimatedState::new(InnerProps::default()),
            overlay: AnimatedState::new(OverlayProps::default()),
        }
    }

    /// Advance all groups by one frame; `global`, then `inner`, then `overlay`.
    ///
    /// Returns `true` if any group changed.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        let global = self.global.advance(delta_ms);
        let inner = self.inner.advance(delta_ms);
        let overlay = self.overlay.advance(delta_ms);
        global || inner || overlay
    }
}
