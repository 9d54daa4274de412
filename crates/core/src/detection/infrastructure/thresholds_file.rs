use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::thresholds::{ThresholdError, Thresholds};
use crate::geometry::domain::landmark_scheme::LandmarkScheme;

#[derive(Error, Debug)]
pub enum ThresholdFileError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ThresholdError),
}

/// Detector settings as stored on disk. Missing fields take defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub thresholds: Thresholds,
    pub landmarks: LandmarkScheme,
}

impl DetectorSettings {
    pub fn load(path: &Path) -> Result<Self, ThresholdFileError> {
        let json = fs::read_to_string(path).map_err(|source| ThresholdFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_json::from_str(&json).map_err(|source| ThresholdFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.thresholds.validate()?;
        log::debug!("Loaded detector settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), ThresholdFileError> {
        let write_err = |source: std::io::Error| ThresholdFileError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| write_err(e.into()))?;
        fs::write(path, json).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "settings.json",
            r#"{"thresholds": {"mouth_consec_frames": 6}}"#,
        );
        let settings = DetectorSettings::load(&path).unwrap();
        assert_eq!(settings.thresholds.mouth_consec_frames, 6);
        assert_eq!(settings.thresholds.eye_threshold, 0.25);
        assert_eq!(settings.landmarks, LandmarkScheme::default());
    }

    #[test]
    fn test_load_empty_object_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "settings.json", "{}");
        assert_eq!(
            DetectorSettings::load(&path).unwrap(),
            DetectorSettings::default()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DetectorSettings::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ThresholdFileError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "settings.json", "{ not json");
        let err = DetectorSettings::load(&path).unwrap_err();
        assert!(matches!(err, ThresholdFileError::Parse { .. }));
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn test_load_rejects_invalid_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "settings.json",
            r#"{"thresholds": {"eye_consec_frames": 0}}"#,
        );
        let err = DetectorSettings::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ThresholdFileError::Invalid(ThresholdError::ZeroFrames { .. })
        ));
    }

    #[test]
    fn test_save_then_load_preserves_custom_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = DetectorSettings {
            thresholds: Thresholds {
                drowsy_blink_threshold: 30,
                ..Default::default()
            },
            landmarks: LandmarkScheme {
                left_eye: [0, 1, 2, 3, 4, 5],
                ..Default::default()
            },
        };
        settings.save(&path).unwrap();
        assert_eq!(DetectorSettings::load(&path).unwrap(), settings);
    }
}
