mod config;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use drowsiness_core::detection::domain::event_detector::EventDetector;
use drowsiness_core::landmarks::domain::landmark_source::LandmarkSource;
use drowsiness_core::landmarks::infrastructure::jsonl_landmark_reader::JsonlLandmarkReader;
use drowsiness_core::landmarks::infrastructure::prefetching_landmark_source::PrefetchingLandmarkSource;
use drowsiness_core::pipeline::frame_report::{FrameReport, SessionSummary};
use drowsiness_core::pipeline::monitor_logger::StdoutMonitorLogger;
use drowsiness_core::pipeline::monitor_session::MonitorSession;
use drowsiness_core::pipeline::monitor_use_case::{FrameCallback, MonitorUseCase};

/// Blink, yawn and drowsiness monitoring over recorded face landmarks.
#[derive(Parser)]
#[command(name = "drowsiness-monitor")]
struct Cli {
    /// Landmark trace in JSON Lines format ("-" reads stdin).
    input: PathBuf,

    /// JSON settings file with thresholds and landmark indices.
    #[arg(long)]
    config: Option<PathBuf>,

    /// EAR below which a frame counts as eyes closed.
    #[arg(long)]
    eye_threshold: Option<f64>,

    /// Consecutive closed frames needed for a blink.
    #[arg(long)]
    eye_frames: Option<u32>,

    /// MAR above which a frame counts as mouth open.
    #[arg(long)]
    mouth_threshold: Option<f64>,

    /// Consecutive open-mouth frames needed for a yawn.
    #[arg(long)]
    mouth_frames: Option<u32>,

    /// Blink count above which the driver is considered drowsy.
    #[arg(long)]
    drowsy_blinks: Option<u32>,

    /// Yawn count above which the driver is considered drowsy.
    #[arg(long)]
    drowsy_yawns: Option<u32>,

    /// Output format: text or json.
    #[arg(long, default_value = "text")]
    format: String,

    /// Print a status line every Nth frame (text format).
    #[arg(long, default_value = "1")]
    every: u64,

    /// Start with drowsiness alerts disabled.
    #[arg(long)]
    no_alerts: bool,

    /// Read the trace on a background thread.
    #[arg(long)]
    prefetch: bool,

    /// Write the effective settings to this file and exit.
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = config::resolve_settings(&cli)?;
    if let Some(path) = &cli.write_config {
        settings.save(path)?;
        log::info!("Settings written to {}", path.display());
        return Ok(());
    }

    let detector = EventDetector::new(settings.thresholds)?;
    let session =
        MonitorSession::new(detector, settings.landmarks).with_alerts_enabled(!cli.no_alerts);

    let json = cli.format == "json";
    let mut use_case = MonitorUseCase::new(
        open_source(cli.prefetch),
        session,
        Box::new(StdoutMonitorLogger::default()),
        Some(frame_printer(json, cli.every)),
    );

    log::info!("Monitoring {}", cli.input.display());
    let summary = use_case.execute(&cli.input)?;
    print_summary(&summary, json)?;
    Ok(())
}

fn open_source(prefetch: bool) -> Box<dyn LandmarkSource> {
    let reader: Box<dyn LandmarkSource> = Box::new(JsonlLandmarkReader::new());
    if prefetch {
        Box::new(PrefetchingLandmarkSource::new(reader))
    } else {
        reader
    }
}

/// Prints reports as they arrive. Stops the loop once stdout is gone.
fn frame_printer(json: bool, every: u64) -> FrameCallback {
    let mut was_alert = false;
    Box::new(move |report: &FrameReport| {
        let mut out = std::io::stdout().lock();
        let result = if json {
            match serde_json::to_string(report) {
                Ok(line) => writeln!(out, "{line}"),
                Err(e) => {
                    log::error!("Failed to encode frame report: {e}");
                    return false;
                }
            }
        } else if report.alert != was_alert || report.frame % every == 0 {
            writeln!(out, "{}", report.status_line())
        } else {
            Ok(())
        };
        was_alert = report.alert;
        result.is_ok()
    })
}

fn print_summary(summary: &SessionSummary, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    if json {
        let value = serde_json::json!({ "summary": summary });
        writeln!(out, "{value}")?;
        return Ok(());
    }
    writeln!(
        out,
        "Final Stats - Runtime: {}, Blinks: {}, Yawns: {}{}",
        summary.runtime_clock(),
        summary.blink_count,
        summary.yawn_count,
        if summary.is_drowsy { " (drowsy)" } else { "" }
    )?;
    writeln!(
        out,
        "Frames: {} ({} without face), resets: {}, average FPS: {:.1}",
        summary.frames_processed,
        summary.frames_without_face,
        summary.resets,
        summary.average_fps
    )?;
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.write_config.is_none() && !is_stdin(&cli.input) && !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.format != "text" && cli.format != "json" {
        return Err(format!("Format must be 'text' or 'json', got '{}'", cli.format).into());
    }
    if cli.every == 0 {
        return Err("--every must be at least 1".into());
    }
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}
