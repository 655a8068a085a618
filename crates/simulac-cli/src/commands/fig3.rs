use std::error::Error;

use clap::Args;
use simulac_phage::{FateMethod, PhageConfig};
use simulac_plot::fig3;

use super::common::{print_json, FigureArgs, ScanArgs, SetArgs};

#[derive(Args, Debug)]
pub struct Fig3Args {
    #[command(flatten)]
    pub set: SetArgs,
    /// Fate method splitting the population.
    #[arg(long, default_value_t = FateMethod::Arkin)]
    pub method: FateMethod,
    #[command(flatten)]
    pub scan: ScanArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
}

pub fn run(args: &Fig3Args) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    let config = PhageConfig::from_set(&set.config)?;
    let summary = fig3(
        &args.figure.out,
        &set.data,
        &config,
        args.method,
        &args.scan.params(),
        args.figure.title.as_deref(),
        &args.figure.config(),
    )?;
    print_json(&summary)
}
