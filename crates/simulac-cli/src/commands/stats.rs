use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use simulac_stats::compute_stats;
use tracing::info;

use super::common::{print_json, SetArgs};

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub set: SetArgs,
    /// Species name, resolved through `species_<NAME>_index`.
    #[arg(long)]
    pub variable: String,
    /// Divide by the volume column before aggregating.
    #[arg(long)]
    pub normalize: bool,
    /// Write the series as CSV instead of printing JSON.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: &StatsArgs) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    let stats = compute_stats(&set.data, &set.config, &args.variable, args.normalize)?;
    let time = set.data.time_axis(set.config.time_index)?;
    match &args.csv {
        Some(path) => {
            stats.write_csv(path, time.view())?;
            info!(path = %path.display(), variable = %args.variable, "wrote series");
            Ok(())
        }
        None => print_json(&stats.rows(time.view())?),
    }
}
