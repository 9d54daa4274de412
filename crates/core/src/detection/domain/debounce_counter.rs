/// Counts consecutive frames for which a condition holds and fires one
/// event when the run ends after lasting at least `min_frames`.
///
/// The run counter returns to 0 on every frame where the condition is
/// false, whether or not an event fired. A run that never ends never fires.
#[derive(Clone, Debug)]
pub struct DebounceCounter {
    min_frames: u32,
    consecutive: u32,
}

impl DebounceCounter {
    pub fn new(min_frames: u32) -> Self {
        Self {
            min_frames,
            consecutive: 0,
        }
    }

    /// Feeds one frame. Returns `true` on the frame that completes an event.
    pub fn observe(&mut self, condition: bool) -> bool {
        if condition {
            self.consecutive = self.consecutive.saturating_add(1);
            return false;
        }
        let fired = self.consecutive >= self.min_frames;
        self.consecutive = 0;
        fired
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    pub fn reset(&mut self) {
        self.consecutive = 0;
    }
}
