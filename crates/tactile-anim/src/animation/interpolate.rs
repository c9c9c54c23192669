//! Linear interpolation between transition endpoints.

/// Blend `from` and `to` by weight `t`.
///
/// The weighted-sum form returns `from` exactly at `t = 0` and `to` exactly at
/// `t = 1`. `t` is deliberately not clamped so overshooting easing curves carry
/// through to the property value.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}
