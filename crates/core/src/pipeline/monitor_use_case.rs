use std::path::Path;
use std::time::Instant;

use crate::landmarks::domain::landmark_frame::StreamItem;
use crate::landmarks::domain::landmark_source::LandmarkSource;
use crate::pipeline::frame_report::{FrameReport, SessionSummary};
use crate::pipeline::monitor_logger::MonitorLogger;
use crate::pipeline::monitor_session::MonitorSession;

/// Per-frame presentation hook. Returning `false` stops the loop.
pub type FrameCallback = Box<dyn FnMut(&FrameReport) -> bool + Send>;

/// Runs the frame loop: source → evaluate primary face → detector → callback.
///
/// Single-threaded with respect to the detector: every update happens on
/// the thread calling [`MonitorUseCase::execute`], even when the source
/// prefetches on its own worker.
pub struct MonitorUseCase {
    source: Box<dyn LandmarkSource>,
    session: MonitorSession,
    logger: Box<dyn MonitorLogger>,
    on_frame: Option<FrameCallback>,
}

impl MonitorUseCase {
    pub fn new(
        source: Box<dyn LandmarkSource>,
        session: MonitorSession,
        logger: Box<dyn MonitorLogger>,
        on_frame: Option<FrameCallback>,
    ) -> Self {
        Self {
            source,
            session,
            logger,
            on_frame,
        }
    }

    pub fn session(&self) -> &MonitorSession {
        &self.session
    }

    /// Consumes the stream at `input` until it ends, fails, or the callback
    /// asks to stop. Source and landmark errors abort the run.
    pub fn execute(&mut self, input: &Path) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        self.source.open(input)?;
        let result = self.run_loop();
        self.source.close();
        self.logger.summary();
        result?;
        Ok(self.session.summary())
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut last_frame = Instant::now();
        let mut frames: u64 = 0;

        for item in self.source.frames() {
            let frame = match item? {
                StreamItem::Command(command) => {
                    self.session.apply(command);
                    continue;
                }
                StreamItem::Frame(frame) => frame,
            };

            let t0 = Instant::now();
            let ratios = self
                .session
                .evaluate(&frame)
                .map_err(|e| format!("frame {}: {e}", frame.index))?;
            let t1 = Instant::now();
            let report = self.session.record(&frame, ratios);
            let t2 = Instant::now();

            self.logger.timing("evaluate", (t1 - t0).as_secs_f64() * 1000.0);
            self.logger.timing("detect", (t2 - t1).as_secs_f64() * 1000.0);
            self.logger.metric("faces", frame.faces.len() as f64);

            log::debug!("{}", report.status_line());

            frames += 1;
            self.logger.progress(frames);
            self.session.record_frame_time(last_frame.elapsed());
            last_frame = Instant::now();

            if let Some(callback) = self.on_frame.as_mut() {
                if !callback(&report) {
                    self.logger.info("Stopped by caller");
                    break;
                }
            }
        }
        Ok(())
    }
}
