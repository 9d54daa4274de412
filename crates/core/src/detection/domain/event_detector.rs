//! Blink/yawn event detector.
//!
//! Two structurally identical debounce sub-machines run side by side:
//! the blink machine watches `EAR < eye_threshold`, the yawn machine
//! watches `MAR > mouth_threshold`. Each registers one event on the frame
//! its condition ends after holding for the configured minimum.
//!
//! A frame without a face is a missing observation: nothing changes and
//! the previous counts come back. A degenerate ratio of 0 is an
//! observation like any other (below the eye threshold, not above the
//! mouth threshold).

use crate::detection::domain::debounce_counter::DebounceCounter;
use crate::detection::domain::thresholds::{ThresholdError, Thresholds};
use crate::geometry::domain::face_ratios::FaceRatios;

/// Snapshot of the detector's mutable state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectorState {
    pub blink_count: u32,
    pub yawn_count: u32,
    pub consecutive_low_ear_frames: u32,
    pub consecutive_high_mar_frames: u32,
    pub is_drowsy: bool,
}

/// Result of one [`EventDetector::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectionUpdate {
    pub blink_count: u32,
    pub yawn_count: u32,
    pub is_drowsy: bool,
    /// This frame's EAR was below the eye threshold.
    pub eyes_closed: bool,
    /// This frame's MAR was above the mouth threshold.
    pub mouth_open: bool,
    pub blink_registered: bool,
    pub yawn_registered: bool,
}

pub struct EventDetector {
    thresholds: Thresholds,
    blink: DebounceCounter,
    yawn: DebounceCounter,
    blink_count: u32,
    yawn_count: u32,
}

impl EventDetector {
    pub fn new(thresholds: Thresholds) -> Result<Self, ThresholdError> {
        thresholds.validate()?;
        Ok(Self {
            blink: DebounceCounter::new(thresholds.eye_consec_frames),
            yawn: DebounceCounter::new(thresholds.mouth_consec_frames),
            thresholds,
            blink_count: 0,
            yawn_count: 0,
        })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Feeds one frame's ratios. `None` means no face this frame; each
    /// sub-machine only advances when its own ratio is present.
    pub fn update(&mut self, ear: Option<f64>, mar: Option<f64>) -> DetectionUpdate {
        let was_drowsy = self.is_drowsy();

        let eyes_closed = ear.is_some_and(|v| v < self.thresholds.eye_threshold);
        let mouth_open = mar.is_some_and(|v| v > self.thresholds.mouth_threshold);

        let blink_registered = ear.is_some() && self.blink.observe(eyes_closed);
        if blink_registered {
            self.blink_count = self.blink_count.saturating_add(1);
            log::debug!("Blink registered (total {})", self.blink_count);
        }

        let yawn_registered = mar.is_some() && self.yawn.observe(mouth_open);
        if yawn_registered {
            self.yawn_count = self.yawn_count.saturating_add(1);
            log::debug!("Yawn registered (total {})", self.yawn_count);
        }

        let is_drowsy = self.is_drowsy();
        if is_drowsy && !was_drowsy {
            log::warn!(
                "Drowsiness threshold exceeded: {} blinks, {} yawns",
                self.blink_count,
                self.yawn_count
            );
        }

        DetectionUpdate {
            blink_count: self.blink_count,
            yawn_count: self.yawn_count,
            is_drowsy,
            eyes_closed,
            mouth_open,
            blink_registered,
            yawn_registered,
        }
    }

    /// Feeds the primary face's ratios, or a missing observation.
    pub fn observe(&mut self, ratios: Option<&FaceRatios>) -> DetectionUpdate {
        self.update(ratios.map(|r| r.ear), ratios.map(|r| r.mar))
    }

    /// Zeroes all counters. Thresholds are kept.
    pub fn reset(&mut self) {
        self.blink.reset();
        self.yawn.reset();
        self.blink_count = 0;
        self.yawn_count = 0;
    }

    /// Strictly greater than the drowsy thresholds, on lifetime counts.
    pub fn is_drowsy(&self) -> bool {
        self.blink_count > self.thresholds.drowsy_blink_threshold
            || self.yawn_count > self.thresholds.drowsy_yawn_threshold
    }

    pub fn state(&self) -> DetectorState {
        DetectorState {
            blink_count: self.blink_count,
            yawn_count: self.yawn_count,
            consecutive_low_ear_frames: self.blink.consecutive(),
            consecutive_high_mar_frames: self.yawn.consecutive(),
            is_drowsy: self.is_drowsy(),
        }
    }
}
