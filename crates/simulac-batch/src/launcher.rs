//! Starting the simulator for one job.

use std::process::Command;

use simulac_core::{ErrorInfo, SimulacError};
use tracing::debug;

use crate::plan::{format_volume, BatchJob, BatchPlan};

/// Runs one batch job to completion.
pub trait Launcher {
    /// Launches `job`; an error marks the job failed without stopping the batch.
    fn launch(&mut self, plan: &BatchPlan, job: &BatchJob) -> Result<(), SimulacError>;
}

/// Simulator arguments for `job`.
pub fn command_args(plan: &BatchPlan, job: &BatchJob) -> Vec<String> {
    vec![
        "-v".into(),
        format_volume(job.volume),
        format!("--config-file={}", plan.subdir.join(&plan.config_file).display()),
        format!("--python-setup={}", plan.subdir.join(&plan.setup_file).display()),
        "-o".into(),
        job.output.display().to_string(),
        "-d".into(),
        plan.debug_level.to_string(),
        "-l".into(),
        job.log.display().to_string(),
    ]
}

/// Runs the plan's executable as a child process and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, plan: &BatchPlan, job: &BatchJob) -> Result<(), SimulacError> {
        let args = command_args(plan, job);
        debug!(executable = %plan.executable, ?args, "launching simulator");
        let status = Command::new(&plan.executable)
            .args(&args)
            .env("SIMULAC_CONFDIR", &plan.conf_dir)
            .status()
            .map_err(|err| {
                SimulacError::Io(
                    ErrorInfo::new("launch_spawn", err.to_string())
                        .with_context("executable", plan.executable.clone()),
                )
            })?;
        if !status.success() {
            return Err(SimulacError::Batch(
                ErrorInfo::new("launch_failed", "simulator exited unsuccessfully")
                    .with_context("status", status.to_string())
                    .with_context("output", job.output.display().to_string()),
            ));
        }
        Ok(())
    }
}
