use std::fmt;
use std::str::FromStr;

use crate::shared::landmark_set::LandmarkSet;

/// Landmark extraction output for one video frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkFrame {
    pub index: u64,
    pub timestamp_ms: Option<f64>,
    /// Zero or more faces, in the extractor's order.
    pub faces: Vec<LandmarkSet>,
}

impl LandmarkFrame {
    pub fn new(index: u64, faces: Vec<LandmarkSet>) -> Self {
        Self {
            index,
            timestamp_ms: None,
            faces,
        }
    }

    /// The face fed to the detector. Additional faces are ignored.
    pub fn primary_face(&self) -> Option<&LandmarkSet> {
        self.faces.first()
    }
}

/// User commands that can arrive between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    Reset,
    ToggleAlerts,
}

impl FromStr for ControlCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reset" => Ok(Self::Reset),
            "toggle_alerts" => Ok(Self::ToggleAlerts),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "reset"),
            Self::ToggleAlerts => write!(f, "toggle_alerts"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StreamItem {
    Frame(LandmarkFrame),
    Command(ControlCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::point::Point;
    use rstest::rstest;

    #[test]
    fn test_primary_face_is_first() {
        let a = LandmarkSet::new(vec![Point::new(0.1, 0.1)]);
        let b = LandmarkSet::new(vec![Point::new(0.9, 0.9)]);
        let frame = LandmarkFrame::new(0, vec![a.clone(), b]);
        assert_eq!(frame.primary_face(), Some(&a));
    }

    #[test]
    fn test_primary_face_none_without_faces() {
        assert!(LandmarkFrame::new(3, vec![]).primary_face().is_none());
    }

    #[rstest]
    #[case::reset("reset", ControlCommand::Reset)]
    #[case::toggle("toggle_alerts", ControlCommand::ToggleAlerts)]
    fn test_command_name_round_trip(#[case] name: &str, #[case] command: ControlCommand) {
        assert_eq!(name.parse::<ControlCommand>().unwrap(), command);
        assert_eq!(command.to_string(), name);
    }

    #[test]
    fn test_unknown_command_rejected() {
        let err = "quit".parse::<ControlCommand>().unwrap_err();
        assert!(err.contains("quit"));
    }
}
