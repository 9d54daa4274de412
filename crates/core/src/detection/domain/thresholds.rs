use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_DROWSY_BLINK_THRESHOLD, DEFAULT_DROWSY_YAWN_THRESHOLD, DEFAULT_EYE_CONSEC_FRAMES,
    DEFAULT_EYE_THRESHOLD, DEFAULT_MOUTH_CONSEC_FRAMES, DEFAULT_MOUTH_THRESHOLD,
};

#[derive(Error, Debug, PartialEq)]
pub enum ThresholdError {
    #[error("{name} must be a positive finite ratio, got {value}")]
    InvalidRatio { name: &'static str, value: f64 },
    #[error("{name} must be at least 1 frame")]
    ZeroFrames { name: &'static str },
}

/// Detection thresholds, fixed for the lifetime of a run.
///
/// The drowsy thresholds compare against lifetime counts since the last
/// reset, not against a per-minute rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// EAR below this counts as a closed-eye frame.
    pub eye_threshold: f64,
    pub eye_consec_frames: u32,
    /// MAR above this counts as an open-mouth frame.
    pub mouth_threshold: f64,
    pub mouth_consec_frames: u32,
    pub drowsy_blink_threshold: u32,
    pub drowsy_yawn_threshold: u32,
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        check_ratio("eye_threshold", self.eye_threshold)?;
        check_ratio("mouth_threshold", self.mouth_threshold)?;
        check_frames("eye_consec_frames", self.eye_consec_frames)?;
        check_frames("mouth_consec_frames", self.mouth_consec_frames)?;
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            eye_threshold: DEFAULT_EYE_THRESHOLD,
            eye_consec_frames: DEFAULT_EYE_CONSEC_FRAMES,
            mouth_threshold: DEFAULT_MOUTH_THRESHOLD,
            mouth_consec_frames: DEFAULT_MOUTH_CONSEC_FRAMES,
            drowsy_blink_threshold: DEFAULT_DROWSY_BLINK_THRESHOLD,
            drowsy_yawn_threshold: DEFAULT_DROWSY_YAWN_THRESHOLD,
        }
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<(), ThresholdError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ThresholdError::InvalidRatio { name, value })
    }
}

fn check_frames(name: &'static str, frames: u32) -> Result<(), ThresholdError> {
    if frames == 0 {
        Err(ThresholdError::ZeroFrames { name })
    } else {
        Ok(())
    }
}
