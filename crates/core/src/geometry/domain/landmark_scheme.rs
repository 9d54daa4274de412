use serde::{Deserialize, Serialize};

use crate::shared::constants::{LEFT_EYE_POINTS, MOUTH_POINTS, RIGHT_EYE_POINTS};

/// Which landmark ids make up each eye and the mouth.
///
/// Selected from the landmark source's numbering, never computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkScheme {
    pub left_eye: [usize; 6],
    pub right_eye: [usize; 6],
    pub mouth: [usize; 8],
}

impl Default for LandmarkScheme {
    fn default() -> Self {
        Self {
            left_eye: LEFT_EYE_POINTS,
            right_eye: RIGHT_EYE_POINTS,
            mouth: MOUTH_POINTS,
        }
    }
}
