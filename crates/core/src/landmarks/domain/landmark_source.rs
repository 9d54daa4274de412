use std::path::Path;

use crate::landmarks::domain::landmark_frame::StreamItem;

/// Supplies per-frame face landmarks (and interleaved control commands).
///
/// Implementations own acquisition and landmark extraction; the detector
/// only sees the resulting point sets. An `Err` item is a hard stop for the
/// frame loop.
pub trait LandmarkSource: Send {
    fn open(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>>;

    /// Returns an iterator over items in stream order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<StreamItem, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
