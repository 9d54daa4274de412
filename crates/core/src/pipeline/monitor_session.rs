use std::time::{Duration, Instant};

use crate::detection::domain::event_detector::EventDetector;
use crate::geometry::domain::face_ratios::FaceRatios;
use crate::geometry::domain::landmark_scheme::LandmarkScheme;
use crate::landmarks::domain::landmark_frame::{ControlCommand, LandmarkFrame};
use crate::pipeline::frame_rate_meter::FrameRateMeter;
use crate::pipeline::frame_report::{FrameReport, SessionSummary};
use crate::shared::landmark_set::LandmarkError;

/// Per-run state around one detector: evaluates the primary face of each
/// frame, feeds the detector, and applies control commands.
pub struct MonitorSession {
    detector: EventDetector,
    scheme: LandmarkScheme,
    alerts_enabled: bool,
    frames_processed: u64,
    frames_without_face: u64,
    resets: u32,
    started: Instant,
    meter: FrameRateMeter,
}

impl MonitorSession {
    pub fn new(detector: EventDetector, scheme: LandmarkScheme) -> Self {
        Self {
            detector,
            scheme,
            alerts_enabled: true,
            frames_processed: 0,
            frames_without_face: 0,
            resets: 0,
            started: Instant::now(),
            meter: FrameRateMeter::default(),
        }
    }

    pub fn with_alerts_enabled(mut self, enabled: bool) -> Self {
        self.alerts_enabled = enabled;
        self
    }

    /// Evaluates the frame's primary face. Fails only when the landmark set
    /// is too short for the scheme; detector state is untouched then.
    pub fn evaluate(&self, frame: &LandmarkFrame) -> Result<Option<FaceRatios>, LandmarkError> {
        frame
            .primary_face()
            .map(|face| FaceRatios::evaluate(face, &self.scheme))
            .transpose()
    }

    /// Feeds already-evaluated ratios for `frame` into the detector.
    pub fn record(&mut self, frame: &LandmarkFrame, ratios: Option<FaceRatios>) -> FrameReport {
        let update = self.detector.observe(ratios.as_ref());
        self.frames_processed += 1;
        if ratios.is_none() {
            self.frames_without_face += 1;
        }

        FrameReport {
            frame: frame.index,
            timestamp_ms: frame.timestamp_ms,
            faces: frame.faces.len(),
            ear: ratios.map(|r| r.ear),
            mar: ratios.map(|r| r.mar),
            blink_count: update.blink_count,
            yawn_count: update.yawn_count,
            is_drowsy: update.is_drowsy,
            eyes_closed: update.eyes_closed,
            mouth_open: update.mouth_open,
            alert: update.is_drowsy && self.alerts_enabled,
        }
    }

    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Result<FrameReport, LandmarkError> {
        let ratios = self.evaluate(frame)?;
        Ok(self.record(frame, ratios))
    }

    pub fn apply(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Reset => {
                self.detector.reset();
                self.resets += 1;
                self.started = Instant::now();
                log::info!("Counters reset - Blinks: 0, Yawns: 0");
            }
            ControlCommand::ToggleAlerts => {
                self.alerts_enabled = !self.alerts_enabled;
                let status = if self.alerts_enabled {
                    "enabled"
                } else {
                    "disabled"
                };
                log::info!("Drowsiness alerts {status}");
            }
        }
    }

    pub fn record_frame_time(&mut self, frame_time: Duration) {
        self.meter.record(frame_time);
    }

    pub fn summary(&self) -> SessionSummary {
        let state = self.detector.state();
        SessionSummary {
            frames_processed: self.frames_processed,
            frames_without_face: self.frames_without_face,
            resets: self.resets,
            blink_count: state.blink_count,
            yawn_count: state.yawn_count,
            is_drowsy: state.is_drowsy,
            average_fps: self.meter.average_fps(),
            runtime_secs: self.started.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::thresholds::Thresholds;
    use crate::shared::landmark_set::LandmarkSet;
    use crate::shared::point::Point;

    fn scheme() -> LandmarkScheme {
        LandmarkScheme {
            left_eye: [0, 1, 2, 3, 4, 5],
            right_eye: [0, 1, 2, 3, 4, 5],
            mouth: [6, 7, 8, 9, 10, 11, 12, 13],
        }
    }

    /// Both eyes share one set of points; `eye` and `mouth` are openings.
    fn face(eye: f64, mouth: f64) -> LandmarkSet {
        let (e, m) = (eye / 2.0, mouth / 2.0);
        LandmarkSet::new(vec![
            Point::new(0.3, 0.4),
            Point::new(0.35, 0.4 - e),
            Point::new(0.45, 0.4 - e),
            Point::new(0.5, 0.4),
            Point::new(0.45, 0.4 + e),
            Point::new(0.35, 0.4 + e),
            Point::new(0.35, 0.7),
            Point::new(0.42, 0.7 - m),
            Point::new(0.50, 0.7 - m),
            Point::new(0.58, 0.7 - m),
            Point::new(0.65, 0.7),
            Point::new(0.58, 0.7 + m),
            Point::new(0.50, 0.7 + m),
            Point::new(0.42, 0.7 + m),
        ])
    }

    fn open_face() -> LandmarkSet {
        face(0.1, 0.02) // EAR 0.5, MAR ~0.067
    }

    fn closed_face() -> LandmarkSet {
        face(0.01, 0.02) // EAR 0.05
    }

    fn session() -> MonitorSession {
        MonitorSession::new(EventDetector::new(Thresholds::default()).unwrap(), scheme())
    }

    fn frame(index: u64, faces: Vec<LandmarkSet>) -> LandmarkFrame {
        LandmarkFrame::new(index, faces)
    }

    #[test]
    fn test_blink_through_frames() {
        let mut s = session();
        s.process_frame(&frame(0, vec![closed_face()])).unwrap();
        s.process_frame(&frame(1, vec![closed_face()])).unwrap();
        let report = s.process_frame(&frame(2, vec![open_face()])).unwrap();
        assert_eq!(report.blink_count, 1);
        assert_eq!(report.frame, 2);
        assert_eq!(report.faces, 1);
    }

    #[test]
    fn test_only_primary_face_counts() {
        let mut s = session();
        for i in 0..2 {
            s.process_frame(&frame(i, vec![open_face(), closed_face()]))
                .unwrap();
        }
        let report = s
            .process_frame(&frame(2, vec![open_face(), open_face()]))
            .unwrap();
        assert_eq!(report.blink_count, 0);
        assert_eq!(report.faces, 2);
    }

    #[test]
    fn test_report_carries_source_timestamp() {
        let mut s = session();
        let stamped = LandmarkFrame {
            timestamp_ms: Some(1465.2),
            ..frame(44, vec![open_face()])
        };
        assert_eq!(s.process_frame(&stamped).unwrap().timestamp_ms, Some(1465.2));
        let unstamped = s.process_frame(&frame(45, vec![])).unwrap();
        assert_eq!(unstamped.timestamp_ms, None);
    }

    #[test]
    fn test_no_face_reports_absent_ratios() {
        let mut s = session();
        let report = s.process_frame(&frame(0, vec![])).unwrap();
        assert_eq!(report.ear, None);
        assert_eq!(report.mar, None);
        assert_eq!(s.summary().frames_without_face, 1);
        assert_eq!(s.summary().frames_processed, 1);
    }

    #[test]
    fn test_short_landmarks_error_leaves_state() {
        let mut s = session();
        let short = LandmarkSet::new(vec![Point::new(0.5, 0.5); 3]);
        assert!(s.process_frame(&frame(0, vec![short])).is_err());
        assert_eq!(s.summary().frames_processed, 0);
    }

    #[test]
    fn test_reset_command() {
        let mut s = session();
        for i in 0..2 {
            s.process_frame(&frame(i, vec![closed_face()])).unwrap();
        }
        s.process_frame(&frame(2, vec![open_face()])).unwrap();
        s.apply(ControlCommand::Reset);
        let summary = s.summary();
        assert_eq!(summary.blink_count, 0);
        assert_eq!(summary.resets, 1);
        assert_eq!(summary.frames_processed, 3);
    }

    #[test]
    fn test_toggle_alerts_masks_alert_not_drowsiness() {
        let thresholds = Thresholds {
            drowsy_blink_threshold: 0,
            ..Default::default()
        };
        let mut s = MonitorSession::new(EventDetector::new(thresholds).unwrap(), scheme());
        for i in 0..2 {
            s.process_frame(&frame(i, vec![closed_face()])).unwrap();
        }
        let report = s.process_frame(&frame(2, vec![open_face()])).unwrap();
        assert!(report.is_drowsy);
        assert!(report.alert);

        s.apply(ControlCommand::ToggleAlerts);
        let report = s.process_frame(&frame(3, vec![open_face()])).unwrap();
        assert!(report.is_drowsy);
        assert!(!report.alert);
        assert!(!s.alerts_enabled);
    }

    #[test]
    fn test_summary_average_fps() {
        let mut s = session();
        s.record_frame_time(Duration::from_millis(50));
        assert!((s.summary().average_fps - 20.0).abs() < 1e-9);
    }
}
