#![deny(missing_docs)]
#![doc = "Generates simulac run sets by launching the simulator over a grid of volumes and trials."]

pub mod launcher;
pub mod plan;
pub mod runner;

pub use launcher::{command_args, Launcher, ProcessLauncher};
pub use plan::{format_volume, linspace, load_plan, BatchJob, BatchPlan};
pub use runner::{run_batch, BatchReport, JobOutcome, JobState, LOG_FILE};
