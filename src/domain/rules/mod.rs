// Domain rules - Frame range validation, time conversion and plan construction

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::path::default_output_path;

/// Codec used when selected audio tracks are mixed
pub const DEFAULT_MIX_CODEC: &str = "aac";

/// Turns a clip request and a probe result into an invocation plan
#[derive(Debug, Clone)]
pub struct ClipPlanner {
    mix_codec: String,
}

impl Default for ClipPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_MIX_CODEC)
    }
}

impl ClipPlanner {
    /// Create a planner that encodes mixed audio with `mix_codec`
    pub fn new(mix_codec: impl Into<String>) -> Self {
        Self {
            mix_codec: mix_codec.into(),
        }
    }

    /// Run every validation step and build the plan
    pub fn plan(&self, request: &ClipRequest, probe: &MediaProbe) -> Result<InvocationPlan, DomainError> {
        Self::validate_frame_range(probe, request.start_frame, request.end_frame)?;
        Self::validate_audio_selection(probe, request.audio_tracks.as_deref())?;
        let window = Self::compute_time_window(probe, request.start_frame, request.end_frame)?;
        self.build_plan(request, probe, &window)
    }

    /// Check frame bounds against the video's frame count
    pub fn validate_frame_range(
        probe: &MediaProbe,
        start_frame: Option<i64>,
        end_frame: Option<i64>,
    ) -> Result<(), DomainError> {
        if start_frame.is_none() && end_frame.is_none() {
            return Ok(());
        }

        let video = require_video(probe)?;
        let total_frames = video.total_frames.ok_or_else(|| {
            DomainError::probe("Video stream does not report a frame count")
        })?;

        let check = |which: FrameBound, frame: Option<i64>| -> Result<(), DomainError> {
            match frame {
                Some(frame) if frame < 0 || frame as u64 > total_frames => {
                    Err(DomainError::FrameOutOfBounds {
                        which,
                        frame,
                        total_frames,
                    })
                }
                _ => Ok(()),
            }
        };
        check(FrameBound::Start, start_frame)?;
        check(FrameBound::End, end_frame)?;

        if let (Some(start), Some(end)) = (start_frame, end_frame) {
            if start >= end {
                return Err(DomainError::InvalidRange { start, end });
            }
        }

        Ok(())
    }

    /// Check that every requested track is a position among the audio streams
    pub fn validate_audio_selection(
        probe: &MediaProbe,
        tracks: Option<&[i64]>,
    ) -> Result<(), DomainError> {
        let available = probe.audio_track_count();
        for &track in tracks.unwrap_or_default() {
            if track < 0 || track as u64 >= available as u64 {
                return Err(DomainError::AudioTrackOutOfRange { track, available });
            }
        }
        Ok(())
    }

    /// Convert frame bounds to an exact start offset and duration
    pub fn compute_time_window(
        probe: &MediaProbe,
        start_frame: Option<i64>,
        end_frame: Option<i64>,
    ) -> Result<TimeWindow, DomainError> {
        if start_frame.is_none() && end_frame.is_none() {
            return Ok(TimeWindow::default());
        }

        let rate = require_video(probe)?.frame_rate;
        let overflow =
            |frame: i64| DomainError::probe(format!("Frame {} at {} fps does not fit a time offset", frame, rate));

        let start = start_frame
            .map(|frame| rate.frame_to_seconds(frame).ok_or_else(|| overflow(frame)))
            .transpose()?;
        let duration = end_frame
            .map(|end| {
                end.checked_sub(start_frame.unwrap_or(0))
                    .and_then(|frames| rate.frame_to_seconds(frames))
                    .ok_or_else(|| overflow(end))
            })
            .transpose()?;

        Ok(TimeWindow { start, duration })
    }

    /// Resolve video, audio and output handling into a plan
    pub fn build_plan(
        &self,
        request: &ClipRequest,
        probe: &MediaProbe,
        window: &TimeWindow,
    ) -> Result<InvocationPlan, DomainError> {
        let video = match (&probe.video, request.copy_video) {
            (None, _) => VideoHandling::Absent,
            (Some(_), true) => VideoHandling::Copy,
            (Some(_), false) => VideoHandling::Reencode,
        };

        let audio = match &request.audio_tracks {
            None => AudioHandling::CopyAll,
            Some(tracks) => {
                let tracks = tracks
                    .iter()
                    .map(|&track| {
                        usize::try_from(track).map_err(|_| DomainError::AudioTrackOutOfRange {
                            track,
                            available: probe.audio_track_count(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                for &track in &tracks {
                    if let Some(stream) = probe.audio_streams.get(track) {
                        debug!(track, stream_index = stream.index, codec = %stream.codec, "Mixing audio track");
                    }
                }
                AudioHandling::Mix {
                    tracks,
                    codec: self.mix_codec.clone(),
                    loudnorm: !request.no_loudnorm,
                }
            }
        };

        let output = match &request.output {
            Some(output) => output.clone(),
            None => default_output_path(&request.input).ok_or_else(|| DomainError::InputNotFound {
                path: request.input.display().to_string(),
            })?,
        };

        Ok(InvocationPlan {
            input: request.input.clone(),
            start_seconds: window.start.map(seconds_to_f64),
            duration_seconds: window.duration.map(seconds_to_f64),
            video,
            audio,
            output,
        })
    }
}

fn require_video(probe: &MediaProbe) -> Result<&VideoStreamInfo, DomainError> {
    probe
        .video
        .as_ref()
        .ok_or_else(|| DomainError::probe("Frame bounds given but the input has no video stream"))
}

#[cfg(test)]
mod tests;
