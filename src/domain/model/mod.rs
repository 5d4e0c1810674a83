// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;

pub use num_rational::Rational64;
use num_traits::{CheckedDiv, CheckedMul, Signed};
use serde::Serialize;

use crate::domain::errors::DomainError;

/// Parse a plain non-negative decimal such as `"12.345"` exactly
///
/// Returns `None` for anything else, including values that do not fit in an `i64` fraction.
pub fn parse_decimal(text: &str) -> Option<Rational64> {
    let (whole, fraction) = match text.trim().split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text.trim(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let scale = 10i64.checked_pow(u32::try_from(fraction.len()).ok()?)?;
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = if fraction.is_empty() { 0 } else { fraction.parse().ok()? };
    let numer = whole.checked_mul(scale)?.checked_add(fraction)?;
    Some(Rational64::new(numer, scale))
}

/// Seconds as floating point; only done at the ffmpeg boundary
pub fn seconds_to_f64(seconds: Rational64) -> f64 {
    *seconds.numer() as f64 / *seconds.denom() as f64
}

/// Frames per second as an exact, strictly positive rational
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate(Rational64);

impl FrameRate {
    /// Create a frame rate from numerator and denominator
    pub fn new(num: i64, den: i64) -> Result<Self, DomainError> {
        if num <= 0 || den <= 0 {
            return Err(DomainError::probe(format!(
                "Frame rate must be positive: {}/{}",
                num, den
            )));
        }
        Ok(Self(Rational64::new(num, den)))
    }

    /// Parse ffprobe's `r_frame_rate` text: `"30000/1001"`, `"25"` or `"23.976"`
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::probe(format!("Invalid frame rate: '{}'", text));

        let rate = match text.trim().split_once('/') {
            Some((num, den)) => {
                let num: i64 = num.trim().parse().map_err(|_| invalid())?;
                let den: i64 = den.trim().parse().map_err(|_| invalid())?;
                if num <= 0 || den <= 0 {
                    return Err(invalid());
                }
                Rational64::new(num, den)
            }
            None => parse_decimal(text).ok_or_else(invalid)?,
        };

        if !rate.is_positive() {
            return Err(invalid());
        }
        Ok(Self(rate))
    }

    pub fn as_ratio(&self) -> Rational64 {
        self.0
    }

    /// Time offset of a frame index in seconds, `None` on overflow
    pub fn frame_to_seconds(&self, frame: i64) -> Option<Rational64> {
        Rational64::from_integer(frame).checked_div(&self.0)
    }

    /// Frame count covered by a span of time, `None` on overflow
    pub fn seconds_to_frames(&self, seconds: Rational64) -> Option<Rational64> {
        seconds.checked_mul(&self.0)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.numer(), self.0.denom())
    }
}

/// Video stream information
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStreamInfo {
    /// Stream index in the container
    pub index: usize,
    pub codec: String,
    pub frame_rate: FrameRate,
    /// Total frame count, `None` when the container does not record it
    pub total_frames: Option<u64>,
}

impl VideoStreamInfo {
    pub fn new(index: usize, codec: String, frame_rate: FrameRate, total_frames: Option<u64>) -> Self {
        Self {
            index,
            codec,
            frame_rate,
            total_frames,
        }
    }
}

/// Audio stream information
#[derive(Debug, Clone, PartialEq)]
pub struct AudioStreamInfo {
    /// Stream index in the container
    pub index: usize,
    pub codec: String,
    pub channels: Option<u32>,
}

impl AudioStreamInfo {
    pub fn new(index: usize, codec: String) -> Self {
        Self {
            index,
            codec,
            channels: None,
        }
    }
}

/// Read-only description of a media file's streams
#[derive(Debug, Clone, PartialEq)]
pub struct MediaProbe {
    pub video: Option<VideoStreamInfo>,
    /// Audio streams in container order; position is the user-facing track number
    pub audio_streams: Vec<AudioStreamInfo>,
}

impl MediaProbe {
    /// Create new media probe, rejecting more than one video stream
    pub fn new(
        mut video_streams: Vec<VideoStreamInfo>,
        audio_streams: Vec<AudioStreamInfo>,
    ) -> Result<Self, DomainError> {
        if video_streams.len() > 1 {
            return Err(DomainError::MultipleVideoTracks {
                count: video_streams.len(),
            });
        }
        Ok(Self {
            video: video_streams.pop(),
            audio_streams,
        })
    }

    pub fn audio_track_count(&self) -> usize {
        self.audio_streams.len()
    }
}

/// User intent for a single clip operation
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    pub input: PathBuf,
    pub start_frame: Option<i64>,
    pub end_frame: Option<i64>,
    /// Audio tracks to mix, by position among the audio streams
    pub audio_tracks: Option<Vec<i64>>,
    pub output: Option<PathBuf>,
    pub copy_video: bool,
    pub no_loudnorm: bool,
}

impl ClipRequest {
    /// Create a request that copies the whole input with default handling
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            start_frame: None,
            end_frame: None,
            audio_tracks: None,
            output: None,
            copy_video: false,
            no_loudnorm: false,
        }
    }

    pub fn with_frames(mut self, start_frame: Option<i64>, end_frame: Option<i64>) -> Self {
        self.start_frame = start_frame;
        self.end_frame = end_frame;
        self
    }

    pub fn with_audio_tracks(mut self, tracks: Vec<i64>) -> Self {
        self.audio_tracks = Some(tracks);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_copy_video(mut self, copy_video: bool) -> Self {
        self.copy_video = copy_video;
        self
    }

    pub fn with_no_loudnorm(mut self, no_loudnorm: bool) -> Self {
        self.no_loudnorm = no_loudnorm;
        self
    }
}

/// Input window derived from frame bounds, in exact seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    pub start: Option<Rational64>,
    pub duration: Option<Rational64>,
}

/// How the video stream is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoHandling {
    /// Stream copy without decoding
    Copy,
    /// Re-encode with the encoder ffmpeg selects for the output container
    Reencode,
    /// Input has no video stream; nothing is mapped
    Absent,
}

/// How audio is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AudioHandling {
    /// Every audio stream, stream-copied
    CopyAll,
    /// Selected tracks mixed into one re-encoded stream
    Mix {
        tracks: Vec<usize>,
        codec: String,
        loudnorm: bool,
    },
}

/// Fully resolved instructions for one ffmpeg run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationPlan {
    pub input: PathBuf,
    pub start_seconds: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub video: VideoHandling,
    pub audio: AudioHandling,
    pub output: PathBuf,
}

/// Result of a finished external tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub exit_code: i32,
    pub output: PathBuf,
}
