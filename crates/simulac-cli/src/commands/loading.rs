use std::error::Error;

use clap::Args;
use simulac_plot::loading;

use super::common::{FigureArgs, SetArgs};

#[derive(Args, Debug)]
pub struct LoadingArgs {
    #[command(flatten)]
    pub set: SetArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
}

pub fn run(args: &LoadingArgs) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    loading(
        &args.figure.out,
        &set.data,
        &set.config,
        args.figure.title.as_deref(),
        &args.figure.config(),
    )?;
    Ok(())
}
