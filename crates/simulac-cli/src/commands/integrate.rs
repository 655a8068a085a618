use std::error::Error;

use clap::Args;
use serde::Serialize;
use simulac_stats::integrate_ensemble;

use super::common::{print_json, SetArgs};

#[derive(Args, Debug)]
pub struct IntegrateArgs {
    #[command(flatten)]
    pub set: SetArgs,
    /// Species name, resolved through `species_<NAME>_index`.
    #[arg(long)]
    pub variable: String,
}

#[derive(Debug, Serialize)]
struct IntegralReport<'a> {
    variable: &'a str,
    integrals: Vec<f64>,
}

pub fn run(args: &IntegrateArgs) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    let species = set.config.require_species(&args.variable)?;
    let integrals = integrate_ensemble(
        &set.data,
        species,
        set.config.volume_index,
        set.config.time_index,
    )?;
    print_json(&IntegralReport {
        variable: &args.variable,
        integrals,
    })
}
