//! Batch execution with skip-existing and an append-only log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};
use tracing::{info, warn};

use crate::launcher::Launcher;
use crate::plan::{format_volume, BatchJob, BatchPlan};

/// Batch log name inside the plan's subdirectory.
pub const LOG_FILE: &str = "gensims.log";

const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// State of a batch job after the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobState {
    /// The output already existed.
    Skipped,
    /// The launcher completed.
    Complete,
    /// The launcher returned an error.
    Failed,
}

/// Outcome of one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// The job.
    pub job: BatchJob,
    /// What happened to it.
    pub state: JobState,
    /// Launcher error, when failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcomes of a batch run in job order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One entry per job.
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    /// Number of jobs in `state`.
    pub fn count(&self, state: &JobState) -> usize {
        self.outcomes.iter().filter(|outcome| &outcome.state == state).count()
    }
}

fn log_error(path: &Path, err: std::io::Error) -> SimulacError {
    SimulacError::Io(
        ErrorInfo::new("batch_log_write", err.to_string()).with_path(path),
    )
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn open_log(path: &Path) -> Result<File, SimulacError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| log_error(path, err))
}

/// Runs every job of `plan` whose output does not exist yet.
///
/// Plan validation happens before the log is touched. Launcher failures are
/// recorded in the report and the remaining jobs still run.
pub fn run_batch(plan: &BatchPlan, launcher: &mut dyn Launcher) -> Result<BatchReport, SimulacError> {
    let jobs = plan.jobs()?;
    let log_path = plan.subdir.join(LOG_FILE);
    let mut log = open_log(&log_path)?;
    writeln!(log, "-------").map_err(|err| log_error(&log_path, err))?;
    writeln!(
        log,
        "{}: Nvolumes={}, Ntrials={}, Trial0={}",
        timestamp(),
        plan.volumes.len(),
        plan.trials,
        plan.trial0
    )
    .map_err(|err| log_error(&log_path, err))?;

    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in jobs {
        if job.output.exists() {
            info!(output = %job.output.display(), "already exists; skipping");
            outcomes.push(JobOutcome {
                job,
                state: JobState::Skipped,
                error: None,
            });
            continue;
        }
        writeln!(
            log,
            "{}:   volume={}, trial={} -> {}",
            timestamp(),
            format_volume(job.volume),
            job.trial,
            job.output.display()
        )
        .map_err(|err| log_error(&log_path, err))?;
        log.flush().map_err(|err| log_error(&log_path, err))?;

        let outcome = match launcher.launch(plan, &job) {
            Ok(()) => JobOutcome {
                job,
                state: JobState::Complete,
                error: None,
            },
            Err(err) => {
                warn!(output = %job.output.display(), %err, "simulator run failed");
                JobOutcome {
                    job,
                    state: JobState::Failed,
                    error: Some(err.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }
    let report = BatchReport { outcomes };
    info!(
        complete = report.count(&JobState::Complete),
        skipped = report.count(&JobState::Skipped),
        failed = report.count(&JobState::Failed),
        "batch finished"
    );
    Ok(report)
}
