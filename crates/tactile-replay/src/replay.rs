//! Headless frame loop.
//!
//! A trace is a list of timestamped pointer events plus the cursor style of
//! every element they mention. Replaying it drives a [`Cursor`] through an
//! [`EventBus`] the way a page would, with a display refresh every
//! `frame_ms` milliseconds. Frames are only ticked while the cursor asks for
//! them; when it goes idle the loop sleeps until the next event.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use tactile_anim::{Cursor, CursorFrame, EventBus, PointerEvent, StyleTable};
use tactile_config::TactileConfig;
use tracing::{debug, info, warn};

/// Frame indices stay below this so `index * frame_ms` is exact.
const MAX_FRAME_INDEX: u64 = 1 << 53;

/// Recorded input.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Trace {
    /// Native cursor keyword of each element, keyed by target id.
    #[serde(default)]
    pub styles: StyleTable,
    pub events: Vec<TimedEvent>,
}

impl Trace {
    /// Reject timestamps the display clock cannot reach.
    pub fn validate(&self, frame_ms: f64) -> Result<()> {
        for (index, timed) in self.events.iter().enumerate() {
            if !timed.at.is_finite() {
                bail!("event {index}: timestamp {} is not finite", timed.at);
            }
            if timed.at / frame_ms >= MAX_FRAME_INDEX as f64 {
                bail!(
                    "event {index}: timestamp {} ms is out of range for {frame_ms} ms frames",
                    timed.at
                );
            }
        }
        Ok(())
    }
}

/// One pointer event at `at` milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimedEvent {
    pub at: f64,
    pub event: PointerEvent,
}

/// Output line: a frame stamped with its display time.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayFrame {
    pub at: f64,
    #[serde(flatten)]
    pub frame: CursorFrame,
}

/// How the display clock runs.
#[derive(Debug, Clone, Copy)]
pub struct ReplayOptions {
    pub frame_ms: f64,
    /// Emit unchanged frames too.
    pub all_frames: bool,
}

/// Run `trace` through a fresh cursor and collect the emitted frames.
pub fn replay(trace: Trace, config: &TactileConfig, options: ReplayOptions) -> Vec<ReplayFrame> {
    let mut events = trace.events;
    // Stable: events sharing a timestamp keep their recorded order.
    events.sort_by(|a, b| a.at.total_cmp(&b.at));

    let cursor = Rc::new(RefCell::new(Cursor::from_config(config, trace.styles)));
    let bus = Rc::new(EventBus::new());
    let _subscription = Cursor::start(&cursor, bus.clone());

    let mut frames = Vec::new();
    let mut pending = events.iter().peekable();
    let mut frame_index: u64 = 0;

    loop {
        let now = frame_index as f64 * options.frame_ms;

        while let Some(timed) = pending.next_if(|timed| timed.at <= now) {
            debug!(at = timed.at, event = ?timed.event.kind(), "dispatch");
            bus.dispatch(&timed.event);
        }

        if cursor.borrow().wants_frame() {
            let frame = cursor.borrow_mut().tick(now);
            if frame.changed || options.all_frames {
                frames.push(ReplayFrame { at: now, frame });
            }
        }

        if cursor.borrow().wants_frame() {
            frame_index += 1;
            continue;
        }
        let Some(next) = pending.peek() else {
            break;
        };
        // Idle: wake on the first display frame at or after the next event.
        let wake = (next.at / options.frame_ms).ceil().max(0.0);
        if !(wake < MAX_FRAME_INDEX as f64) {
            warn!(at = next.at, "event beyond the display clock, stopping");
            break;
        }
        frame_index = (wake as u64).max(frame_index + 1);
    }

    info!(
        events = events.len(),
        frames = frames.len(),
        "replay finished"
    );
    frames
}
