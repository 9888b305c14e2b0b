use std::path::{Path, PathBuf};

use posebeat_model::LandmarkSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const RECORDING_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("failed to read recording {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write recording {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed recording {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode recording {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unsupported recording version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("recording tick rate must be positive")]
    ZeroTickRate,
}

/// Per-tick landmark input of one session, replayable in place of a camera.
///
/// `None` frames are ticks on which inference produced nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseRecording {
    pub version: u32,
    pub tick_rate: u32,
    pub frames: Vec<Option<LandmarkSet>>,
}

impl PoseRecording {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            version: RECORDING_VERSION,
            tick_rate,
            frames: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn read(path: &Path) -> Result<Self, RecordingError> {
        let data = std::fs::read_to_string(path).map_err(|source| RecordingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let recording: Self =
            serde_json::from_str(&data).map_err(|source| RecordingError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if recording.version != RECORDING_VERSION {
            return Err(RecordingError::Version {
                found: recording.version,
                expected: RECORDING_VERSION,
            });
        }
        if recording.tick_rate == 0 {
            return Err(RecordingError::ZeroTickRate);
        }
        Ok(recording)
    }

    pub fn write(&self, path: &Path) -> Result<(), RecordingError> {
        let json = serde_json::to_string(self).map_err(|source| RecordingError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| RecordingError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Captures the landmark input fed to a session, one entry per tick.
#[derive(Debug, Clone)]
pub struct PoseRecorder {
    recording: PoseRecording,
}

impl PoseRecorder {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            recording: PoseRecording::new(tick_rate),
        }
    }

    pub fn push(&mut self, frame: Option<&LandmarkSet>) {
        self.recording.frames.push(frame.cloned());
    }

    pub fn len(&self) -> usize {
        self.recording.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recording.is_empty()
    }

    pub fn finish(self) -> PoseRecording {
        self.recording
    }
}
