use std::error::Error;

use clap::Args;
use simulac_phage::{FateMethod, PhageConfig};
use simulac_plot::compare_fate;

use super::common::{print_json, FigureArgs, ScanArgs, SetArgs};

#[derive(Args, Debug)]
pub struct CompareFateArgs {
    #[command(flatten)]
    pub set: SetArgs,
    /// Comma-separated fate methods, one figure column each.
    #[arg(long, value_delimiter = ',', default_value = "arkin,pre-active,final-dimer")]
    pub methods: Vec<FateMethod>,
    #[command(flatten)]
    pub scan: ScanArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
}

pub fn run(args: &CompareFateArgs) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    let config = PhageConfig::from_set(&set.config)?;
    let comparison = compare_fate(
        &args.figure.out,
        &set.data,
        &config,
        &args.methods,
        &args.scan.params(),
        &args.figure.config(),
    )?;
    print_json(&comparison)
}
