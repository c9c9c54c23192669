//! Easing functions for transition timing.
//!
//! Each curve maps normalized time `t` in `[0, 1]` to an interpolation weight.
//! Unlike CSS timing functions the input is **not** clamped and the output may
//! leave `[0, 1]`: the exponential-sine curves ring around 1.0 before settling,
//! which gives the cursor its springy overshoot.
//!
//! ```
//! use tactile_anim::animation::Easing;
//!
//! let w = Easing::CubicOut.evaluate(0.5);
//! assert!((w - 0.875).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Angular frequency shared by the exponential-sine curves (`2π / 0.3`).
const RING_FREQUENCY: f64 = 20.943951023931955;

/// Named easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// `(t - 1)³ + 1`
    CubicOut,
    /// `(t - 1)⁵ + 1`
    QuinticOut,
    /// Damped sine at half frequency; used for the rotation release.
    #[serde(rename = "exponential-sine-1")]
    ExponentialSine1,
    /// Damped sine at full frequency; used for the press scale release.
    #[serde(rename = "exponential-sine-2")]
    ExponentialSine2,
    /// `(1 - cos(πt)) / 2`
    HalfCosineEase,
}

impl Easing {
    /// All named curves.
    pub const ALL: [Easing; 5] = [
        Easing::CubicOut,
        Easing::QuinticOut,
        Easing::ExponentialSine1,
        Easing::ExponentialSine2,
        Easing::HalfCosineEase,
    ];

    /// Evaluate the curve at normalized time `t`.
    pub fn evaluate(self, t: f64) -> f64 {
        match self {
            Self::CubicOut => cubic_out(t),
            Self::QuinticOut => quintic_out(t),
            Self::ExponentialSine1 => exponential_sine_1(t),
            Self::ExponentialSine2 => exponential_sine_2(t),
            Self::HalfCosineEase => half_cosine(t),
        }
    }

    /// Kebab-case name of the curve.
    pub fn name(self) -> &'static str {
        match self {
            Self::CubicOut => "cubic-out",
            Self::QuinticOut => "quintic-out",
            Self::ExponentialSine1 => "exponential-sine-1",
            Self::ExponentialSine2 => "exponential-sine-2",
            Self::HalfCosineEase => "half-cosine-ease",
        }
    }
}

#[inline]
fn cubic_out(t: f64) -> f64 {
    let u = t - 1.0;
    u * u * u + 1.0
}

#[inline]
fn quintic_out(t: f64) -> f64 {
    let u = t - 1.0;
    u * u * u * u * u + 1.0
}

/// The linear tail cancels the residual `2^-10 * sin(..)` term at `t = 1`.
#[inline]
fn exponential_sine_1(t: f64) -> f64 {
    2f64.powf(-10.0 * t) * ((0.5 * t - 0.075) * RING_FREQUENCY).sin() + 1.0
        - 0.0004882812499999998 * t
}

#[inline]
fn exponential_sine_2(t: f64) -> f64 {
    2f64.powf(-10.0 * t) * ((t - 0.075) * RING_FREQUENCY).sin() + 1.0 - 0.00048828125 * t
}

#[inline]
fn half_cosine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}
