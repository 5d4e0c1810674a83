//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -show_streams` as a subprocess and maps its JSON output onto
//! [`MediaProbe`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter running `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_media(&self, file_path: &Path) -> Result<MediaProbe, DomainError> {
        debug!(program = %self.program.display(), file = %file_path.display(), "Running ffprobe");

        let output = Command::new(&self.program)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(file_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::probe(format!(
                    "Failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::probe(format!(
                "{} failed on {}: {}",
                self.program.display(),
                file_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_probe_output(&output.stdout)
    }
}

// FFprobe JSON output structures
#[derive(Debug, Deserialize)]
struct FFprobeOutput {
    #[serde(default)]
    streams: Vec<FFprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FFprobeStream {
    index: usize,
    codec_type: Option<String>,
    codec_name: Option<String>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
    channels: Option<u32>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Parse `ffprobe -print_format json -show_streams` output
pub fn parse_probe_output(json: &[u8]) -> Result<MediaProbe, DomainError> {
    let parsed: FFprobeOutput = serde_json::from_slice(json)
        .map_err(|e| DomainError::probe(format!("Failed to parse ffprobe output: {}", e)))?;

    let mut video_streams = Vec::new();
    let mut audio_streams = Vec::new();

    for stream in parsed.streams {
        match stream.codec_type.as_deref() {
            Some("video") => video_streams.push(video_stream_info(stream)?),
            Some("audio") => {
                let mut info = AudioStreamInfo::new(stream.index, codec_name(&stream));
                info.channels = stream.channels;
                audio_streams.push(info);
            }
            _ => {}
        }
    }

    let probe = MediaProbe::new(video_streams, audio_streams)?;
    debug!(
        video = ?probe.video,
        audio_tracks = probe.audio_track_count(),
        "Parsed ffprobe output"
    );
    Ok(probe)
}

fn codec_name(stream: &FFprobeStream) -> String {
    stream
        .codec_name
        .clone()
        .unwrap_or_else(|| "unknown".to_string())
}

fn video_stream_info(stream: FFprobeStream) -> Result<VideoStreamInfo, DomainError> {
    let rate_text = stream.r_frame_rate.as_deref().ok_or_else(|| {
        DomainError::probe(format!("Video stream {} has no frame rate", stream.index))
    })?;
    let frame_rate = FrameRate::parse(rate_text)?;
    let total_frames = total_frames(&stream, frame_rate)?;
    if total_frames.is_none() {
        warn!(stream = stream.index, "Video stream does not report a frame count");
    }

    Ok(VideoStreamInfo::new(
        stream.index,
        codec_name(&stream),
        frame_rate,
        total_frames,
    ))
}

/// Frame count from `nb_frames`, the Matroska statistics tag, or duration × rate
fn total_frames(stream: &FFprobeStream, frame_rate: FrameRate) -> Result<Option<u64>, DomainError> {
    let from_text = |text: &str| text.trim().parse::<u64>().ok();

    if let Some(frames) = stream.nb_frames.as_deref().and_then(from_text) {
        return Ok(Some(frames));
    }

    if let Some(frames) = ["NUMBER_OF_FRAMES", "NUMBER_OF_FRAMES-eng"]
        .iter()
        .find_map(|key| stream.tags.get(*key).and_then(|v| from_text(v.as_str())))
    {
        return Ok(Some(frames));
    }

    let Some(duration) = stream.duration.as_deref().and_then(parse_decimal) else {
        return Ok(None);
    };
    let frames = frame_rate.seconds_to_frames(duration).ok_or_else(|| {
        DomainError::probe(format!(
            "Frame count of stream {} overflows: {} s at {} fps",
            stream.index,
            duration,
            frame_rate
        ))
    })?;
    Ok(u64::try_from(frames.floor().to_integer()).ok())
}
