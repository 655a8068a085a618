use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use simulac_batch::{load_plan, run_batch, BatchPlan, JobState, ProcessLauncher};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct GensimsArgs {
    /// Directory holding the simulator inputs; outputs and the log land here.
    #[arg(short = 's', long)]
    pub subdir: Option<PathBuf>,
    /// YAML plan overriding the default volume grid.
    #[arg(long)]
    pub plan: Option<PathBuf>,
}

pub fn run(args: &GensimsArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = match &args.plan {
        Some(path) => load_plan(path)?,
        None => BatchPlan::default(),
    };
    if let Some(subdir) = &args.subdir {
        plan.subdir = subdir.clone();
    }
    let report = run_batch(&plan, &mut ProcessLauncher)?;
    let failed = report.count(&JobState::Failed);
    info!(
        complete = report.count(&JobState::Complete),
        skipped = report.count(&JobState::Skipped),
        failed,
        "batch finished"
    );
    if failed > 0 {
        warn!(failed, "some simulator runs failed; see the batch log");
    }
    Ok(())
}
