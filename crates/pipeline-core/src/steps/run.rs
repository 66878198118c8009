//! External compiler invocation (SASS, JS bundlers, image optimizers)

use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

use crate::config::{BuildMode, RunSpec};
use crate::steps::StepOutcome;

/// Run the external program with stdio inherited, in the project root.
///
/// Steps gated to the other build mode are skipped, mirroring pipelines
/// that only minify in production builds. A non-zero exit status fails the
/// pipeline.
pub async fn run_program(
    spec: &RunSpec,
    mode: BuildMode,
    project_root: &Path,
) -> Result<StepOutcome> {
    if let Some(required) = spec.mode {
        if required != mode {
            return Ok(StepOutcome::Skipped);
        }
    }

    let status = Command::new(&spec.program)
        .args(&spec.args)
        .current_dir(project_root)
        .status()
        .await
        .with_context(|| format!("Failed to launch {}", spec.program))?;

    if !status.success() {
        anyhow::bail!(
            "{} exited with status {}",
            spec.program,
            status.code().map_or("unknown".to_string(), |c| c.to_string())
        );
    }

    Ok(StepOutcome::Done(None))
}
