//! Frame-rate monitor for the status line.

use std::collections::VecDeque;
use std::time::Duration;

use crate::types::FPS_SAMPLE_WINDOW;

/// Rolling average over the most recent frame times.
#[derive(Debug, Clone)]
pub struct FrameMonitor {
    samples: VecDeque<Duration>,
    total: Duration,
    capacity: usize,
}

impl Default for FrameMonitor {
    fn default() -> Self {
        Self::new(FPS_SAMPLE_WINDOW)
    }
}

impl FrameMonitor {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            total: Duration::ZERO,
            capacity,
        }
    }

    pub fn add_frame_time(&mut self, frame: Duration) {
        if self.samples.len() == self.capacity {
            if let Some(old) = self.samples.pop_front() {
                self.total -= old;
            }
        }
        self.samples.push_back(frame);
        self.total += frame;
    }

    /// Average frames per second, or 0 with no samples.
    pub fn average_fps(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let avg = self.total.as_secs_f64() / self.samples.len() as f64;
        if avg <= 0.0 {
            return 0.0;
        }
        1.0 / avg
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.total = Duration::ZERO;
    }
}
