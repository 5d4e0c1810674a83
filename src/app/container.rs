use std::sync::Arc;

use crate::adapters::{AppConfig, FFmpegAdapter, FFprobeAdapter};
use crate::app::clip_interactor::ClipInteractor;
use crate::domain::rules::ClipPlanner;
use crate::ports::{ExecutePort, ProbePort};

/// Wires the ffprobe/ffmpeg adapters into the application interactors
pub struct DefaultAppContainer {
    clip_interactor: Arc<ClipInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(config.ffprobe.clone()));
        let execute_port = Arc::new(FFmpegAdapter::new(config.ffmpeg.clone()));

        let clip_interactor = Arc::new(ClipInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExecutePort>,
            ClipPlanner::new(config.audio_codec.clone()),
        ));

        Self { clip_interactor }
    }

    pub fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }
}
