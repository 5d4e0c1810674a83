//! frameclip Library
//!
//! Trims a video to a frame range and optionally mixes selected audio tracks.
//! Stream metadata comes from ffprobe and all media work is done by ffmpeg;
//! this crate validates the request, converts frame numbers to exact time
//! offsets and builds the ffmpeg invocation.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    AudioHandling, AudioStreamInfo, ClipRequest, FrameRate, InvocationPlan, MediaProbe, Rational64,
    TimeWindow, VideoHandling, VideoStreamInfo,
};
pub use domain::rules::ClipPlanner;
