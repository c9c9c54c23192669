//! Pointer interaction state machine.
//!
//! Turns pointer input into animation requests on the cursor's state groups:
//!
//! - **press** squishes the body (`inner.scale → 0.9`) and lights the glow;
//! - **press + drag** past a dead zone rotates the cursor around the press
//!   point by steering the base rotate transition of `global`;
//! - **release** springs everything back, spinning the rotation home over a
//!   duration that grows with how far it was wound up;
//! - **hovering** a `pointer`-styled element tilts the cursor and lights the
//!   glow until the pointer reaches a plain element again.
//!
//! Every handler returns `true` when it touched animation state and the host
//! should schedule a frame.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tactile_config::TactileConfig;
use tracing::debug;

use crate::animation::{
    AnimationRequest, CursorStates, Easing, GlobalProp, InnerProp, OverlayProp, Transition,
};

use super::input::{Point, PointerPosition};
use super::probe::CursorKeyword;
use super::rotation::RotationTracker;

const PRESS_DURATION_MS: f64 = 800.0;
const PRESS_SCALE: f64 = 0.9;
const RELEASE_DURATION_MS: f64 = 500.0;
const HOVER_FADE_MS: f64 = 200.0;
const HOVER_UNTILT_MS: f64 = 150.0;
const SPIN_BACK_BASE_MS: f64 = 600.0;

/// Discrete gesture mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    /// The platform is running a native drag-and-drop.
    NativeDrag,
    /// Pressed, still inside the dead zone.
    PressStart,
    /// Pressed and rotating.
    Rotating,
    /// Resting over a `pointer`-styled element.
    HoverPointer,
}

impl DragState {
    /// Whether a press gesture is in progress.
    pub fn is_pressed(self) -> bool {
        matches!(self, Self::PressStart | Self::Rotating)
    }
}

/// Gesture tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSettings {
    /// Rotate-while-pressed gestures enabled.
    pub rotate: bool,
    /// Radius around the press point that does not start a rotation.
    pub dead_zone_px: f64,
    /// Offset between drag axis and the cursor's grab point, radians.
    pub grab_offset: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotate: true,
            dead_zone_px: 30.0,
            grab_offset: deg_to_rad(24.3),
        }
    }
}

impl From<&TactileConfig> for InteractionSettings {
    fn from(config: &TactileConfig) -> Self {
        Self {
            rotate: config.cursor.rotate,
            dead_zone_px: config.gesture.dead_zone_px,
            grab_offset: deg_to_rad(config.gesture.grab_offset_degrees),
        }
    }
}

/// Degrees to radians, in the `deg / 180 * π` order the grab offset is
/// specified with.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees / 180.0 * PI
}

/// Release spin-back duration for a gesture wound up by `radians`.
pub fn spin_back_duration(radians: f64) -> f64 {
    SPIN_BACK_BASE_MS * (1.0 + (radians / 4.0 / PI).abs())
}

/// Drag/rotate/hover state of one cursor.
#[derive(Debug, Clone)]
pub struct InteractionMachine {
    settings: InteractionSettings,
    state: DragState,
    anchor: Point,
    rotation: RotationTracker,
    touch_echo: bool,
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}

impl InteractionMachine {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            settings,
            state: DragState::Idle,
            anchor: Point::default(),
            rotation: RotationTracker::new(),
            touch_echo: false,
        }
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn rotation(&self) -> &RotationTracker {
        &self.rotation
    }

    /// Client position of the current press.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Whether the next move/down will be swallowed as a touch echo.
    pub fn expects_touch_echo(&self) -> bool {
        self.touch_echo
    }

    /// Hover events are ignored, and must not be probed, while pressed.
    pub fn accepts_hover(&self) -> bool {
        !self.state.is_pressed()
    }

    fn set_state(&mut self, next: DragState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "drag state");
            self.state = next;
        }
    }

    /// Consume the touch-echo flag, reporting whether it was set.
    fn take_touch_echo(&mut self) -> bool {
        std::mem::take(&mut self.touch_echo)
    }

    /// Touch input started or moved; the platform will follow up with a
    /// synthesized mouse event that must be ignored.
    pub fn touch(&mut self) {
        self.touch_echo = true;
    }

    pub fn pointer_down(&mut self, position: PointerPosition, states: &mut CursorStates) -> bool {
        if self.take_touch_echo() {
            return false;
        }

        self.anchor = position.client();
        self.rotation.reset();

        states.inner.clear_transitions();
        states.inner.animate(
            AnimationRequest::new(PRESS_DURATION_MS, Easing::CubicOut)
                .to(InnerProp::Scale, PRESS_SCALE),
        );

        // Already glowing from a hover: keep going from the current opacity.
        let glow = if self.state == DragState::HoverPointer {
            AnimationRequest::new(PRESS_DURATION_MS, Easing::QuinticOut).to(OverlayProp::Opacity, 1.0)
        } else {
            AnimationRequest::new(PRESS_DURATION_MS, Easing::QuinticOut)
                .from_to(OverlayProp::Opacity, 0.0, 1.0)
        };
        states.overlay.clear_transitions();
        states.overlay.animate(glow);

        self.set_state(DragState::PressStart);
        true
    }

    pub fn pointer_move(&mut self, position: PointerPosition, states: &mut CursorStates) -> bool {
        if self.take_touch_echo() {
            return false;
        }
        if !self.state.is_pressed() || !self.settings.rotate {
            return false;
        }

        let client = position.client();
        let dx = client.x - self.anchor.x;
        let dy = client.y - self.anchor.y;
        let dead_zone = self.settings.dead_zone_px;
        if dx * dx + dy * dy <= dead_zone * dead_zone {
            return false;
        }
        self.set_state(DragState::Rotating);

        let radians = (-dx).atan2(dy) + self.settings.grab_offset;
        let accumulated = self.rotation.track(radians);
        if let Some(base) = states.global.base_mut() {
            base.end = accumulated;
        }
        true
    }

    pub fn pointer_up(&mut self, states: &mut CursorStates) -> bool {
        if self.state == DragState::Rotating {
            self.release_rotation(states);
        }
        self.set_state(DragState::Idle);

        states.inner.clear_transitions();
        states.inner.animate(
            AnimationRequest::new(RELEASE_DURATION_MS, Easing::ExponentialSine2)
                .to(InnerProp::Scale, 1.0),
        );
        states.overlay.replace_transitions(vec![Transition::new(
            OverlayProp::Opacity,
            1.0,
            0.0,
            RELEASE_DURATION_MS,
            Easing::QuinticOut,
        )]);
        true
    }

    /// Freeze the base rotate transition and spin home with a one-shot
    /// transition; its completion hands control back to the base.
    fn release_rotation(&mut self, states: &mut CursorStates) {
        let accumulated = self.rotation.accumulated();
        let duration = spin_back_duration(accumulated);
        debug!(accumulated, duration, "releasing rotation");

        self.rotation.begin_completion();
        let completing = self.rotation.completion_flag();

        states.global.truncate_transitions(1);
        if let Some(base) = states.global.base_mut() {
            base.disabled = true;
        }
        states.global.animate(
            AnimationRequest::new(duration, Easing::ExponentialSine1)
                .to(GlobalProp::Rotate, 0.0)
                .on_complete(move |global| {
                    if let Some(base) = global.base_mut() {
                        base.disabled = false;
                        base.end = 0.0;
                    }
                    completing.set(false);
                }),
        );
    }

    /// The pointer entered an element whose native cursor is `keyword`.
    pub fn pointer_over(&mut self, keyword: &CursorKeyword, states: &mut CursorStates) -> bool {
        if !self.accepts_hover() {
            return false;
        }

        if keyword.is_plain() {
            if self.state != DragState::HoverPointer {
                return false;
            }
            self.set_state(DragState::Idle);

            states.overlay.clear_transitions();
            states.overlay.animate(
                AnimationRequest::new(HOVER_FADE_MS, Easing::QuinticOut)
                    .to(OverlayProp::Opacity, 0.0),
            );
            // The base sits at index 0 and is applied last each tick, so its
            // end decides the final rotation; the one-shot alone cannot win.
            if let Some(base) = states.global.base_mut() {
                base.end = 0.0;
            }
            states.global.animate(
                AnimationRequest::new(HOVER_UNTILT_MS, Easing::HalfCosineEase)
                    .to(GlobalProp::Rotate, 0.0),
            );
            true
        } else if *keyword == CursorKeyword::Pointer {
            if self.state != DragState::Idle || self.rotation.is_completing() {
                return false;
            }
            self.set_state(DragState::HoverPointer);

            states.global.truncate_transitions(1);
            if let Some(base) = states.global.base_mut() {
                base.end = self.settings.grab_offset;
            }
            states.overlay.clear_transitions();
            states.overlay.animate(
                AnimationRequest::new(HOVER_FADE_MS, Easing::QuinticOut)
                    .to(OverlayProp::Opacity, 1.0),
            );
            true
        } else {
            false
        }
    }

    /// A native drag-and-drop is running.
    pub fn native_drag(&mut self) {
        self.set_state(DragState::NativeDrag);
    }

    /// Native drag finished: snap everything back without animating.
    pub fn native_drag_end(&mut self, states: &mut CursorStates) -> bool {
        states.overlay.clear_transitions();
        states.overlay.set(OverlayProp::Opacity, 0.0);

        // Dropping a running spin-back also drops the callback that would
        // re-enable the base and clear the completion flag.
        states.global.truncate_transitions(1);
        if let Some(base) = states.global.base_mut() {
            base.disabled = false;
            base.end = 0.0;
        }
        self.rotation.end_completion();

        states.inner.clear_transitions();
        states.inner.set(InnerProp::Scale, 1.0);

        self.set_state(DragState::Idle);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn setup() -> (InteractionMachine, CursorStates) {
        (InteractionMachine::default(), CursorStates::new())
    }

    fn grab_offset() -> f64 {
        deg_to_rad(24.3)
    }

    #[test]
    fn test_press_starts_squish_and_glow() {
        let (mut machine, mut states) = setup();
        assert!(machine.pointer_down(PointerPosition::at(100.0, 100.0), &mut states));
        assert_eq!(machine.state(), DragState::PressStart);
        assert_eq!(machine.anchor(), Point::new(100.0, 100.0));

        let inner = &states.inner.transitions()[0];
        assert_eq!(inner.end, 0.9);
        assert_eq!(inner.duration, 800.0);
        assert_eq!(inner.easing, Easing::CubicOut);

        let overlay = &states.overlay.transitions()[0];
        assert_eq!((overlay.start, overlay.end), (0.0, 1.0));
        assert_eq!(overlay.easing, Easing::QuinticOut);
    }

    #[test]
    fn test_press_from_hover_keeps_glow_start() {
        let (mut machine, mut states) = setup();
        machine.pointer_over(&CursorKeyword::Pointer, &mut states);
        states.overlay.set(OverlayProp::Opacity, 0.6);

        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        assert_eq!(states.overlay.transitions().len(), 1);
        assert_eq!(states.overlay.transitions()[0].start, 0.6);
    }

    #[test]
    fn test_dead_zone() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);

        assert!(!machine.pointer_move(PointerPosition::at(20.0, 20.0), &mut states));
        assert_eq!(machine.state(), DragState::PressStart);
        assert_eq!(states.global.base().unwrap().end, 0.0);

        assert!(machine.pointer_move(PointerPosition::at(22.0, 22.0), &mut states));
        assert_eq!(machine.state(), DragState::Rotating);
    }

    #[test]
    fn test_move_uses_scroll_adjusted_positions() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(
            PointerPosition {
                page: Point::new(100.0, 600.0),
                scroll: Point::new(0.0, 500.0),
            },
            &mut states,
        );
        // Page scrolled by 40px under a still pointer: no movement.
        let moved = machine.pointer_move(
            PointerPosition {
                page: Point::new(100.0, 640.0),
                scroll: Point::new(0.0, 540.0),
            },
            &mut states,
        );
        assert!(!moved);
        assert_eq!(machine.state(), DragState::PressStart);
    }

    #[test]
    fn test_rotation_steers_base_end() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(100.0, 100.0), &mut states);
        machine.pointer_move(PointerPosition::at(100.0, 135.0), &mut states);

        let end = states.global.base().unwrap().end;
        assert!((end - grab_offset()).abs() < EPSILON);
        assert!((end - 0.4241150082346221).abs() < 1e-12);
        assert!((machine.rotation().accumulated() - end).abs() < EPSILON);
    }

    #[test]
    fn test_rotate_disabled_ignores_moves() {
        let mut machine = InteractionMachine::new(InteractionSettings {
            rotate: false,
            ..InteractionSettings::default()
        });
        let mut states = CursorStates::new();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        assert!(!machine.pointer_move(PointerPosition::at(0.0, 100.0), &mut states));
        assert_eq!(machine.state(), DragState::PressStart);
    }

    #[test]
    fn test_release_after_rotation() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(100.0, 100.0), &mut states);
        machine.pointer_move(PointerPosition::at(100.0, 135.0), &mut states);
        let accumulated = machine.rotation().accumulated();

        assert!(machine.pointer_up(&mut states));
        assert_eq!(machine.state(), DragState::Idle);
        assert!(machine.rotation().is_completing());

        let global = states.global.transitions();
        assert_eq!(global.len(), 2);
        assert!(global[0].persistent && global[0].disabled);
        let spin = &global[1];
        assert_eq!(spin.end, 0.0);
        assert_eq!(spin.easing, Easing::ExponentialSine1);
        assert!(spin.has_on_complete());
        assert_eq!(spin.duration, spin_back_duration(accumulated));
        assert!((spin.duration - 620.25).abs() < 0.01);

        let overlay = states.overlay.transitions();
        assert_eq!(overlay.len(), 1);
        assert_eq!((overlay[0].start, overlay[0].end), (1.0, 0.0));
        assert_eq!(states.inner.transitions()[0].end, 1.0);
        assert_eq!(states.inner.transitions()[0].easing, Easing::ExponentialSine2);
    }

    #[test]
    fn test_spin_back_completion_rearms_base() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        machine.pointer_move(PointerPosition::at(0.0, 50.0), &mut states);
        states.advance(0.0);
        machine.pointer_up(&mut states);

        let duration = states.global.transitions()[1].duration;
        states.advance(duration);

        assert!(!machine.rotation().is_completing());
        assert_eq!(states.global.values().rotate, 0.0);
        let base = states.global.base().unwrap();
        assert!(!base.disabled);
        assert_eq!(base.end, 0.0);
        assert_eq!(states.global.transitions().len(), 1);
    }

    #[test]
    fn test_plain_release_leaves_global_alone() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        machine.pointer_up(&mut states);
        assert_eq!(states.global.transitions().len(), 1);
        assert!(!machine.rotation().is_completing());
    }

    #[test]
    fn test_hover_pointer_tilts_and_glows() {
        let (mut machine, mut states) = setup();
        assert!(machine.pointer_over(&CursorKeyword::Pointer, &mut states));
        assert_eq!(machine.state(), DragState::HoverPointer);

        assert!((states.global.base().unwrap().end - 0.4241150082346221).abs() < 1e-12);
        let overlay = &states.overlay.transitions()[0];
        assert_eq!(overlay.end, 1.0);
        assert_eq!(overlay.duration, 200.0);

        // Re-entry while already hovering is a no-op.
        assert!(!machine.pointer_over(&CursorKeyword::Pointer, &mut states));
    }

    #[test]
    fn test_hover_blocked_while_spinning_back() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        machine.pointer_move(PointerPosition::at(0.0, 50.0), &mut states);
        machine.pointer_up(&mut states);

        assert!(!machine.pointer_over(&CursorKeyword::Pointer, &mut states));
        assert_eq!(machine.state(), DragState::Idle);
    }

    #[test]
    fn test_hover_plain_leaves_pointer() {
        let (mut machine, mut states) = setup();
        machine.pointer_over(&CursorKeyword::Pointer, &mut states);
        assert!(machine.pointer_over(&CursorKeyword::Auto, &mut states));
        assert_eq!(machine.state(), DragState::Idle);

        let overlay = &states.overlay.transitions()[0];
        assert_eq!(overlay.end, 0.0);
        assert_eq!(overlay.duration, 200.0);

        let global = states.global.transitions();
        assert_eq!(global.len(), 2);
        assert_eq!(global[0].end, 0.0);
        assert_eq!(global[1].duration, 150.0);
        assert_eq!(global[1].easing, Easing::HalfCosineEase);
    }

    #[test]
    fn test_hover_plain_when_idle_is_ignored() {
        let (mut machine, mut states) = setup();
        assert!(!machine.pointer_over(&CursorKeyword::Default, &mut states));
        assert!(!machine.pointer_over(&CursorKeyword::Other("text".into()), &mut states));
        assert!(states.overlay.is_idle());
    }

    #[test]
    fn test_hover_ignored_while_pressed() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        assert!(!machine.accepts_hover());
        assert!(!machine.pointer_over(&CursorKeyword::Pointer, &mut states));
        assert_eq!(machine.state(), DragState::PressStart);
    }

    #[test]
    fn test_touch_echo_swallows_one_event() {
        let (mut machine, mut states) = setup();
        machine.touch();
        assert!(!machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states));
        assert_eq!(machine.state(), DragState::Idle);
        assert!(!machine.expects_touch_echo());

        assert!(machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states));
        assert_eq!(machine.state(), DragState::PressStart);

        machine.touch();
        assert!(!machine.pointer_move(PointerPosition::at(0.0, 100.0), &mut states));
        assert_eq!(machine.state(), DragState::PressStart);
    }

    #[test]
    fn test_native_drag_snaps_back() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        states.advance(100.0);
        machine.native_drag();
        assert_eq!(machine.state(), DragState::NativeDrag);

        assert!(machine.native_drag_end(&mut states));
        assert_eq!(machine.state(), DragState::Idle);
        assert_eq!(states.overlay.values().opacity, 0.0);
        assert_eq!(states.inner.values().scale, 1.0);
        assert!(states.overlay.is_idle());
        assert!(states.inner.is_idle());
        assert_eq!(states.global.transitions().len(), 1);
        assert_eq!(states.global.base().unwrap().end, 0.0);
    }

    #[test]
    fn test_native_drag_end_during_spin_back_rearms_base() {
        let (mut machine, mut states) = setup();
        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        machine.pointer_move(PointerPosition::at(0.0, 100.0), &mut states);
        states.advance(16.0);
        machine.pointer_up(&mut states);
        states.advance(100.0);
        assert!(machine.rotation().is_completing());

        machine.pointer_down(PointerPosition::at(0.0, 0.0), &mut states);
        machine.native_drag();
        assert!(machine.native_drag_end(&mut states));

        assert!(!machine.rotation().is_completing());
        assert_eq!(states.global.transitions().len(), 1);
        let base = states.global.base().unwrap();
        assert!(!base.disabled);
        assert_eq!(base.end, 0.0);

        for _ in 0..200 {
            states.advance(16.0);
        }
        assert_eq!(states.global.values().rotate, 0.0);

        assert!(machine.pointer_over(&CursorKeyword::Pointer, &mut states));
        assert_eq!(machine.state(), DragState::HoverPointer);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = TactileConfig::default();
        config.cursor.rotate = false;
        config.gesture.grab_offset_degrees = 90.0;
        let settings = InteractionSettings::from(&config);
        assert!(!settings.rotate);
        assert!((settings.grab_offset - PI / 2.0).abs() < EPSILON);
        assert_eq!(settings.dead_zone_px, 30.0);
    }
}
