//! Detector settings layering.
//!
//! Priority (lowest to highest):
//! 1. Built-in defaults
//! 2. JSON settings file passed with `--config`
//! 3. Individual threshold flags

use drowsiness_core::detection::infrastructure::thresholds_file::DetectorSettings;

use crate::Cli;

pub fn resolve_settings(cli: &Cli) -> Result<DetectorSettings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => {
            log::info!("Loading settings: {}", path.display());
            DetectorSettings::load(path)?
        }
        None => DetectorSettings::default(),
    };

    apply_overrides(cli, &mut settings);
    settings.thresholds.validate()?;
    Ok(settings)
}

fn apply_overrides(cli: &Cli, settings: &mut DetectorSettings) {
    let t = &mut settings.thresholds;
    if let Some(v) = cli.eye_threshold {
        t.eye_threshold = v;
    }
    if let Some(v) = cli.eye_frames {
        t.eye_consec_frames = v;
    }
    if let Some(v) = cli.mouth_threshold {
        t.mouth_threshold = v;
    }
    if let Some(v) = cli.mouth_frames {
        t.mouth_consec_frames = v;
    }
    if let Some(v) = cli.drowsy_blinks {
        t.drowsy_blink_threshold = v;
    }
    if let Some(v) = cli.drowsy_yawns {
        t.drowsy_yawn_threshold = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["drowsiness-monitor", "trace.jsonl"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = resolve_settings(&parse(&[])).unwrap();
        assert_eq!(settings, DetectorSettings::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let settings =
            resolve_settings(&parse(&["--eye-threshold", "0.2", "--drowsy-yawns", "5"])).unwrap();
        assert_eq!(settings.thresholds.eye_threshold, 0.2);
        assert_eq!(settings.thresholds.drowsy_yawn_threshold, 5);
        assert_eq!(settings.thresholds.mouth_threshold, 0.6);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"thresholds": {"eye_consec_frames": 4, "mouth_consec_frames": 8}}"#,
        )
        .unwrap();
        let path_arg = path.to_str().unwrap();

        let settings =
            resolve_settings(&parse(&["--config", path_arg, "--mouth-frames", "12"])).unwrap();
        assert_eq!(settings.thresholds.eye_consec_frames, 4);
        assert_eq!(settings.thresholds.mouth_consec_frames, 12);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = resolve_settings(&parse(&["--eye-frames", "0"])).unwrap_err();
        assert!(err.to_string().contains("eye_consec_frames"));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(resolve_settings(&parse(&["--config", "/nonexistent/settings.json"])).is_err());
    }
}
