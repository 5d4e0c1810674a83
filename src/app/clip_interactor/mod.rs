// Clip interactor - Orchestrates the probe, plan and execute use case

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the frame-range clip use case
pub struct ClipInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    planner: ClipPlanner,
}

impl ClipInteractor {
    /// Create new clip interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        planner: ClipPlanner,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            planner,
        }
    }

    /// Validate the request against the input file and resolve the plan
    ///
    /// Nothing is executed; every validation error surfaces here.
    pub async fn plan(&self, request: &ClipRequest) -> Result<InvocationPlan, DomainError> {
        let is_file = tokio::fs::metadata(&request.input)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(DomainError::InputNotFound {
                path: request.input.display().to_string(),
            });
        }

        let probe = self.probe_port.probe_media(&request.input).await?;
        info!(
            "Probed {}: video {}, {} audio track(s)",
            request.input.display(),
            describe_video(probe.video.as_ref()),
            probe.audio_track_count()
        );

        let plan = self.planner.plan(request, &probe)?;
        debug!(?plan, "Resolved invocation plan");
        Ok(plan)
    }

    /// Plan and run the clip
    pub async fn execute(&self, request: &ClipRequest) -> Result<ClipResponse, DomainError> {
        let plan = self.plan(request).await?;

        let started = std::time::Instant::now();
        let report = self.execute_port.execute_plan(&plan).await?;
        let processing_time = started.elapsed();

        info!(
            "Clip written to {} in {:.2}s",
            report.output.display(),
            processing_time.as_secs_f64()
        );

        Ok(ClipResponse {
            plan,
            exit_code: report.exit_code,
            processing_time,
        })
    }

    /// Command line the execute port would run for `plan`
    pub fn command_line(&self, plan: &InvocationPlan) -> Vec<String> {
        self.execute_port.command_line(plan)
    }
}

fn describe_video(video: Option<&VideoStreamInfo>) -> String {
    match video {
        Some(video) => match video.total_frames {
            Some(frames) => format!("{} @ {} fps, {} frames", video.codec, video.frame_rate, frames),
            None => format!("{} @ {} fps, unknown frame count", video.codec, video.frame_rate),
        },
        None => "none".to_string(),
    }
}

/// Response from a completed clip
#[derive(Debug, Clone)]
pub struct ClipResponse {
    pub plan: InvocationPlan,
    pub exit_code: i32,
    pub processing_time: Duration,
}
