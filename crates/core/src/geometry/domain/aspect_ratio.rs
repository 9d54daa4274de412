//! Eye and mouth aspect ratios from fixed landmark samples.
//!
//! Both ratios divide summed vertical openings by the horizontal span, so
//! they are invariant to where the face sits in the frame and to its size.
//! A span that collapses to (near) zero yields [`DEGENERATE_RATIO`] instead
//! of a division fault; the detector compares that sentinel against its
//! thresholds like any other value.

use crate::shared::landmark_set::{LandmarkError, LandmarkSet};
use crate::shared::point::Point;

/// Ratio reported when the horizontal span is degenerate.
pub const DEGENERATE_RATIO: f64 = 0.0;

/// Spans at or below this are treated as degenerate.
const MIN_SPAN: f64 = f64::EPSILON;

/// Six eye points: `p0`/`p3` are the corners, `(p1, p5)` and `(p2, p4)` the
/// vertical lid pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeSample(pub [Point; 6]);

/// Eight mouth points: `p0`/`p4` are the corners, `(p1, p7)`, `(p2, p6)` and
/// `(p3, p5)` the vertical lip pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouthSample(pub [Point; 8]);

impl EyeSample {
    pub fn from_landmarks(set: &LandmarkSet, indices: &[usize; 6]) -> Result<Self, LandmarkError> {
        set.select(indices).map(Self)
    }
}

impl MouthSample {
    pub fn from_landmarks(set: &LandmarkSet, indices: &[usize; 8]) -> Result<Self, LandmarkError> {
        set.select(indices).map(Self)
    }
}

/// `EAR = (|p1-p5| + |p2-p4|) / (2 |p0-p3|)`
pub fn eye_aspect_ratio(sample: &EyeSample) -> f64 {
    let p = &sample.0;
    let vertical = p[1].distance(&p[5]) + p[2].distance(&p[4]);
    ratio(vertical, 2.0 * p[0].distance(&p[3]))
}

/// `MAR = (|p1-p7| + |p2-p6| + |p3-p5|) / (3 |p0-p4|)`
pub fn mouth_aspect_ratio(sample: &MouthSample) -> f64 {
    let p = &sample.0;
    let vertical = p[1].distance(&p[7]) + p[2].distance(&p[6]) + p[3].distance(&p[5]);
    ratio(vertical, 3.0 * p[0].distance(&p[4]))
}

fn ratio(vertical: f64, horizontal: f64) -> f64 {
    if horizontal.is_nan() || horizontal <= MIN_SPAN {
        return DEGENERATE_RATIO;
    }
    vertical / horizontal
}
