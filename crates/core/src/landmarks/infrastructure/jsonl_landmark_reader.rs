//! Replays recorded landmark streams from JSON Lines.
//!
//! One object per line, blank lines skipped:
//!
//! ```text
//! {"frame": 0, "timestamp_ms": 0.0, "faces": [[[0.41, 0.38], [0.43, 0.37], ...]]}
//! {"faces": []}
//! {"command": "reset"}
//! ```
//!
//! `frame` defaults to a running counter that continues from the last
//! explicit index. The path `-` reads standard input.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::landmarks::domain::landmark_frame::{ControlCommand, LandmarkFrame, StreamItem};
use crate::landmarks::domain::landmark_source::LandmarkSource;
use crate::shared::landmark_set::LandmarkSet;

#[derive(Error, Debug)]
pub enum LandmarkReadError {
    #[error("failed to open landmark trace {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read error at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {message}")]
    Command { line: usize, message: String },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandRecord {
    command: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameRecord {
    frame: Option<u64>,
    timestamp_ms: Option<f64>,
    #[serde(default)]
    faces: Vec<LandmarkSet>,
}

/// A line must match one record shape exactly; a misspelled key is an error.
#[derive(Deserialize)]
#[serde(untagged)]
enum Record {
    Command(CommandRecord),
    Frame(FrameRecord),
}

pub struct JsonlLandmarkReader {
    reader: Option<Box<dyn BufRead + Send>>,
    attached: bool,
    line: usize,
    next_index: u64,
}

impl JsonlLandmarkReader {
    pub fn new() -> Self {
        Self {
            reader: None,
            attached: false,
            line: 0,
            next_index: 0,
        }
    }

    /// Reads from an already-open stream instead of a path. `open` keeps
    /// that stream until the reader is closed.
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            attached: true,
            ..Self::new()
        }
    }

    fn next_item(&mut self) -> Option<Result<StreamItem, LandmarkReadError>> {
        let reader = self.reader.as_mut()?;
        let mut text = String::new();
        loop {
            text.clear();
            self.line += 1;
            let line = self.line;
            match reader.read_line(&mut text) {
                Ok(0) => return None,
                Ok(_) if text.trim().is_empty() => continue,
                Ok(_) => return Some(parse_record(&text, line, &mut self.next_index)),
                Err(source) => return Some(Err(LandmarkReadError::Io { line, source })),
            }
        }
    }
}

impl Default for JsonlLandmarkReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSource for JsonlLandmarkReader {
    fn open(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if self.attached && self.reader.is_some() {
            log::debug!("Reading attached landmark stream, ignoring {}", path.display());
            return Ok(());
        }
        let reader: Box<dyn BufRead + Send> = if path == Path::new("-") {
            Box::new(BufReader::new(std::io::stdin()))
        } else {
            let file = File::open(path).map_err(|source| LandmarkReadError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(BufReader::new(file))
        };
        self.reader = Some(reader);
        self.line = 0;
        self.next_index = 0;
        log::debug!("Opened landmark trace {}", path.display());
        Ok(())
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<StreamItem, Box<dyn std::error::Error>>> + '_> {
        Box::new(std::iter::from_fn(move || {
            self.next_item()
                .map(|r| r.map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) }))
        }))
    }

    fn close(&mut self) {
        self.reader = None;
        self.attached = false;
    }
}

fn parse_record(
    text: &str,
    line: usize,
    next_index: &mut u64,
) -> Result<StreamItem, LandmarkReadError> {
    let record: Record =
        serde_json::from_str(text).map_err(|source| LandmarkReadError::Parse { line, source })?;

    match record {
        Record::Command(CommandRecord { command }) => command
            .parse::<ControlCommand>()
            .map(StreamItem::Command)
            .map_err(|message| LandmarkReadError::Command { line, message }),
        Record::Frame(FrameRecord {
            frame,
            timestamp_ms,
            faces,
        }) => {
            let index = frame.unwrap_or(*next_index);
            *next_index = index.saturating_add(1);
            Ok(StreamItem::Frame(LandmarkFrame {
                index,
                timestamp_ms,
                faces,
            }))
        }
    }
}
