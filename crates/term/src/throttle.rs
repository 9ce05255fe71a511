//! Redraw throttling.
//!
//! A paused board does not need to be redrawn every loop iteration. The host
//! passes a fingerprint of what is on screen; unchanged frames are skipped
//! until `min_idle_interval` has elapsed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_idle_interval: Duration,
    last_render: Option<Instant>,
    last_fingerprint: u64,
}

impl RenderThrottle {
    pub fn new(min_idle_interval: Duration) -> Self {
        Self {
            min_idle_interval,
            last_render: None,
            last_fingerprint: 0,
        }
    }

    /// Decide whether to render a new frame at `now`.
    pub fn should_render(&mut self, now: Instant, fingerprint: u64) -> bool {
        let due = match self.last_render {
            None => true,
            Some(_) if fingerprint != self.last_fingerprint => true,
            Some(last) => now.duration_since(last) >= self.min_idle_interval,
        };
        if due {
            self.last_render = Some(now);
            self.last_fingerprint = fingerprint;
        }
        due
    }

    /// Render on the next call regardless of fingerprint.
    pub fn invalidate(&mut self) {
        self.last_render = None;
    }
}
