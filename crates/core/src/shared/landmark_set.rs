use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::point::Point;

#[derive(Error, Debug, PartialEq)]
pub enum LandmarkError {
    #[error("landmark index {index} out of range for a set of {len} points")]
    IndexOutOfRange { index: usize, len: usize },
}

/// All landmarks of one detected face in one frame, indexed by the
/// landmark source's fixed id scheme.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<Point, LandmarkError> {
        self.points
            .get(index)
            .copied()
            .ok_or(LandmarkError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    /// Picks the points at `indices`, in that order.
    pub fn select<const N: usize>(&self, indices: &[usize; N]) -> Result<[Point; N], LandmarkError> {
        let mut selected = [Point::default(); N];
        for (slot, &index) in selected.iter_mut().zip(indices.iter()) {
            *slot = self.get(index)?;
        }
        Ok(selected)
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
