use crate::geometry::domain::aspect_ratio::{
    eye_aspect_ratio, mouth_aspect_ratio, EyeSample, MouthSample,
};
use crate::geometry::domain::landmark_scheme::LandmarkScheme;
use crate::shared::landmark_set::{LandmarkError, LandmarkSet};

/// Aspect ratios of one face in one frame.
///
/// `ear` is the mean of both eyes. A degenerate eye contributes its
/// sentinel ratio to the mean unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceRatios {
    pub left_ear: f64,
    pub right_ear: f64,
    pub ear: f64,
    pub mar: f64,
}

impl FaceRatios {
    pub fn evaluate(set: &LandmarkSet, scheme: &LandmarkScheme) -> Result<Self, LandmarkError> {
        let left_ear = eye_aspect_ratio(&EyeSample::from_landmarks(set, &scheme.left_eye)?);
        let right_ear = eye_aspect_ratio(&EyeSample::from_landmarks(set, &scheme.right_eye)?);
        let mar = mouth_aspect_ratio(&MouthSample::from_landmarks(set, &scheme.mouth)?);

        Ok(Self {
            left_ear,
            right_ear,
            ear: (left_ear + right_ear) / 2.0,
            mar,
        })
    }
}
