use serde::Serialize;

/// What the presentation layer receives for each processed frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Capture time from the landmark source, when it supplies one.
    pub timestamp_ms: Option<f64>,
    pub faces: usize,
    /// Absent when no face was detected.
    pub ear: Option<f64>,
    pub mar: Option<f64>,
    pub blink_count: u32,
    pub yawn_count: u32,
    pub is_drowsy: bool,
    pub eyes_closed: bool,
    pub mouth_open: bool,
    /// Drowsy and alerts currently enabled.
    pub alert: bool,
}

/// End-of-stream totals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub frames_without_face: u64,
    pub resets: u32,
    pub blink_count: u32,
    pub yawn_count: u32,
    pub is_drowsy: bool,
    pub average_fps: f64,
    /// Seconds since the session started or was last reset.
    pub runtime_secs: f64,
}

impl FrameReport {
    /// One-line status text, e.g. for a terminal or an overlay.
    pub fn status_line(&self) -> String {
        let ratio = |v: Option<f64>| v.map_or_else(|| "  -  ".to_string(), |v| format!("{v:.3}"));
        let mut line = format!(
            "frame {:>6}  EAR {}  MAR {}  blinks {:>3}  yawns {:>3}",
            self.frame,
            ratio(self.ear),
            ratio(self.mar),
            self.blink_count,
            self.yawn_count
        );
        if self.faces == 0 {
            line.push_str("  [no face]");
        }
        if self.eyes_closed {
            line.push_str("  [eyes closed]");
        }
        if self.mouth_open {
            line.push_str("  [mouth open]");
        }
        if self.alert {
            line.push_str("  DROWSINESS ALERT");
        }
        line
    }
}

impl SessionSummary {
    pub fn runtime_clock(&self) -> String {
        let secs = self.runtime_secs.max(0.0) as u64;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
