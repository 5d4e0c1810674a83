//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::ClipRequest;

/// Arguments describing the clip itself
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Input video file
    pub input: PathBuf,

    /// Starting frame (alias: -sf)
    #[arg(long, value_name = "FRAME", allow_negative_numbers = true)]
    pub start_frame: Option<i64>,

    /// Ending frame (alias: -ef)
    #[arg(long, value_name = "FRAME", allow_negative_numbers = true)]
    pub end_frame: Option<i64>,

    /// Audio tracks to mix, e.g. '0,2'; without it all tracks are copied as-is (alias: -at)
    #[arg(long, value_name = "LIST", value_parser = parse_track_list, allow_hyphen_values = true)]
    pub audio_tracks: Option<TrackList>,

    /// Copy the video stream rather than re-encode it (alias: -cv)
    #[arg(long)]
    pub copy_video: bool,

    /// Skip the loudnorm filter; it only applies with --audio-tracks (alias: -nl)
    #[arg(long)]
    pub no_loudnorm: bool,

    /// Output video file [default: <input-stem>.converted<ext>]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Comma-separated audio track numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackList(pub Vec<i64>);

fn parse_track_list(value: &str) -> Result<TrackList, String> {
    value
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .map_err(|_| format!("'{}' is not an audio track number", part))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(TrackList)
}

impl ClipArgs {
    /// Build the immutable clip request
    pub fn to_request(&self) -> ClipRequest {
        let mut request = ClipRequest::new(self.input.clone())
            .with_frames(self.start_frame, self.end_frame)
            .with_copy_video(self.copy_video)
            .with_no_loudnorm(self.no_loudnorm);
        if let Some(TrackList(tracks)) = &self.audio_tracks {
            request = request.with_audio_tracks(tracks.clone());
        }
        if let Some(output) = &self.output {
            request = request.with_output(output.clone());
        }
        request
    }
}
