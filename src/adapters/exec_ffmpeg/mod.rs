//! FFmpeg execution adapter
//!
//! This module turns an [`InvocationPlan`] into an ffmpeg command line and runs it.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

const MIXED_LABEL: &str = "mixed";
const NORMALIZED_LABEL: &str = "aout";

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter running `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn execute_plan(&self, plan: &InvocationPlan) -> Result<ExecutionReport, DomainError> {
        let args = build_args(plan);
        info!(output = %plan.output.display(), "Running {}", self.tool_name());
        debug!(command = ?self.command_line(plan), "Executing plan");

        let started = Instant::now();
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DomainError::ExternalTool {
                tool: self.tool_name(),
                code: None,
                stderr: format!("Failed to start {}: {}", self.program.display(), e),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(DomainError::ExternalTool {
                tool: self.tool_name(),
                code: output.status.code(),
                stderr,
            });
        }

        debug!(elapsed = ?started.elapsed(), diagnostics = %stderr.trim(), "ffmpeg finished");
        Ok(ExecutionReport {
            exit_code: output.status.code().unwrap_or(0),
            output: plan.output.clone(),
        })
    }

    fn command_line(&self, plan: &InvocationPlan) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(build_args(plan))
            .collect()
    }
}

/// Arguments passed to ffmpeg for a plan, excluding the program name
pub fn build_args(plan: &InvocationPlan) -> Vec<String> {
    let mut args: Vec<String> = ["-hide_banner", "-nostdin"].map(String::from).to_vec();

    // Input options: seek and limit before `-i` so the window applies to the input
    if let Some(start) = plan.start_seconds {
        args.push("-ss".to_string());
        args.push(format_seconds(start));
    }
    if let Some(duration) = plan.duration_seconds {
        args.push("-t".to_string());
        args.push(format_seconds(duration));
    }
    args.push("-i".to_string());
    args.push(plan.input.display().to_string());

    let audio_map = match &plan.audio {
        AudioHandling::CopyAll => "0:a?".to_string(),
        AudioHandling::Mix {
            tracks, loudnorm, ..
        } => {
            let (graph, label) = mix_filter_graph(tracks, *loudnorm);
            args.push("-filter_complex".to_string());
            args.push(graph);
            format!("[{}]", label)
        }
    };

    if plan.video != VideoHandling::Absent {
        args.extend(["-map".to_string(), "0:v".to_string()]);
    }
    args.extend(["-map".to_string(), audio_map]);

    if plan.video == VideoHandling::Copy {
        args.extend(["-c:v".to_string(), "copy".to_string()]);
    }
    let audio_codec = match &plan.audio {
        AudioHandling::CopyAll => "copy",
        AudioHandling::Mix { codec, .. } => codec.as_str(),
    };
    args.extend(["-c:a".to_string(), audio_codec.to_string()]);

    args.push("-y".to_string());
    args.push(plan.output.display().to_string());
    args
}

/// Filter graph mixing `tracks` into one stream, returning the graph and its output label
fn mix_filter_graph(tracks: &[usize], loudnorm: bool) -> (String, &'static str) {
    let inputs: String = tracks.iter().map(|t| format!("[0:a:{}]", t)).collect();
    let mut graph = format!("{}amix=inputs={}[{}]", inputs, tracks.len(), MIXED_LABEL);
    if loudnorm {
        graph.push_str(&format!(";[{}]loudnorm[{}]", MIXED_LABEL, NORMALIZED_LABEL));
        (graph, NORMALIZED_LABEL)
    } else {
        (graph, MIXED_LABEL)
    }
}

fn format_seconds(seconds: f64) -> String {
    format!("{}", seconds)
}
