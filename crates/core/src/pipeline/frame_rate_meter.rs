use std::collections::VecDeque;
use std::time::Duration;

use crate::shared::constants::FRAME_RATE_WINDOW;

/// Rolling mean of per-frame rates over the most recent `window` frames.
pub struct FrameRateMeter {
    window: usize,
    rates: VecDeque<f64>,
}

impl FrameRateMeter {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            rates: VecDeque::with_capacity(window),
        }
    }

    /// Records one frame's wall time. Zero durations carry no rate and are skipped.
    pub fn record(&mut self, frame_time: Duration) {
        let secs = frame_time.as_secs_f64();
        if secs <= 0.0 {
            return;
        }
        if self.rates.len() == self.window {
            self.rates.pop_front();
        }
        self.rates.push_back(1.0 / secs);
    }

    /// Mean frames per second, or 0.0 before any frame was recorded.
    pub fn average_fps(&self) -> f64 {
        if self.rates.is_empty() {
            return 0.0;
        }
        self.rates.iter().sum::<f64>() / self.rates.len() as f64
    }
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new(FRAME_RATE_WINDOW)
    }
}
