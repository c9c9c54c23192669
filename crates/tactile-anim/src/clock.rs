//! Frame timestamps to deltas.

/// Turns absolute frame timestamps (ms) into per-frame deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call; `0` on the first call.
    pub fn delta(&mut self, timestamp_ms: f64) -> f64 {
        let delta = self.last.map_or(0.0, |last| timestamp_ms - last);
        self.last = Some(timestamp_ms);
        delta
    }

    /// Timestamp of the previous call.
    pub fn last(&self) -> Option<f64> {
        self.last
    }
}
