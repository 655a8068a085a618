use std::error::Error;

use clap::Args;
use serde::Serialize;
use simulac_core::Fate;
use simulac_phage::{set_fates, FateMethod, FatePartition, PhageConfig};

use super::common::{print_json, ScanArgs, SetArgs};

#[derive(Args, Debug)]
pub struct FateArgs {
    #[command(flatten)]
    pub set: SetArgs,
    /// Fate method, by name or numeric code.
    #[arg(long, default_value_t = FateMethod::Arkin)]
    pub method: FateMethod,
    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Debug, Serialize)]
struct FateReport {
    method: FateMethod,
    label: &'static str,
    moi: usize,
    fates: Vec<Fate>,
    partition: FatePartition,
    lysogenic_fraction: f64,
}

pub fn run(args: &FateArgs) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    let config = PhageConfig::from_set(&set.config)?;
    let fates = set_fates(&set.data, &config, args.method, &args.scan.params())?;
    let partition = FatePartition::from_fates(&fates);
    let report = FateReport {
        method: args.method,
        label: args.method.label(),
        moi: config.moi,
        lysogenic_fraction: partition.lysogenic_fraction(),
        fates,
        partition,
    };
    print_json(&report)
}
