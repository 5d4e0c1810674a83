// Domain errors - Error taxonomy for clip planning and execution

use thiserror::Error;

/// Domain-specific error types
///
/// Every variant except [`DomainError::ExternalTool`] is raised before ffmpeg
/// is started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input file does not exist or is not a regular file
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Metadata could not be obtained or understood
    #[error("Failed to probe media file: {message}")]
    Probe { message: String },

    /// More than one video stream in the input
    #[error("Multiple video tracks found ({count}); exactly one is supported")]
    MultipleVideoTracks { count: usize },

    /// Frame bound is negative or past the end of the video
    #[error("{which} frame out of bounds: {frame} (video has {total_frames} frames)")]
    FrameOutOfBounds {
        which: FrameBound,
        frame: i64,
        total_frames: u64,
    },

    /// Start frame is not before end frame
    #[error("End frame must be larger than start frame: {start}, {end}")]
    InvalidRange { start: i64, end: i64 },

    /// Requested audio track is not one of the probed audio streams
    #[error("Audio track number wrong: {track} (file has {available} audio tracks)")]
    AudioTrackOutOfRange { track: i64, available: usize },

    /// The external tool ran and exited unsuccessfully
    #[error("{tool} exited with {}:\n{stderr}", exit_description(.code))]
    ExternalTool {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Which end of the frame range a bound error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameBound {
    Start,
    End,
}

impl std::fmt::Display for FrameBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameBound::Start => write!(f, "Start"),
            FrameBound::End => write!(f, "End"),
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl DomainError {
    /// Shorthand for a probe failure
    pub fn probe(message: impl Into<String>) -> Self {
        DomainError::Probe {
            message: message.into(),
        }
    }
}
