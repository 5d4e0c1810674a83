// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe media file and return its video/audio stream description
    async fn probe_media(&self, file_path: &Path) -> Result<MediaProbe, DomainError>;
}

/// Port for running an invocation plan with the external media tool
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run the plan to completion, overwriting the output file
    async fn execute_plan(&self, plan: &InvocationPlan) -> Result<ExecutionReport, DomainError>;

    /// Program and arguments that `execute_plan` would run
    fn command_line(&self, plan: &InvocationPlan) -> Vec<String>;
}
