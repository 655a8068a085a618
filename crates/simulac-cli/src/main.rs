use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    activity::{self, ActivityArgs},
    compare_fate::{self, CompareFateArgs},
    fate::{self, FateArgs},
    fig3::{self, Fig3Args},
    gensims::{self, GensimsArgs},
    integrate::{self, IntegrateArgs},
    loading::{self, LoadingArgs},
    stats::{self, StatsArgs},
    summary::{self, SummaryArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "simulac", about = "Analysis and plotting for simulac lambda phage run sets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report the shape, labels and skipped files of a run set.
    Summary(SummaryArgs),
    /// Classify every run of a set as lytic or lysogenic.
    Fate(FateArgs),
    /// Mean and standard deviation of one species across runs.
    Stats(StatsArgs),
    /// Windowed promoter activity rates across runs.
    Activity(ActivityArgs),
    /// Time integral of a species concentration for every run.
    Integrate(IntegrateArgs),
    /// Render the fate-split distribution figure.
    Fig3(Fig3Args),
    /// Render lysogeny against initial volume for several fate methods.
    CompareFate(CompareFateArgs),
    /// Render RNAP loading over time.
    Loading(LoadingArgs),
    /// Launch the simulator over a grid of volumes and trials.
    Gensims(GensimsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("simulac=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Summary(args) => summary::run(&args),
        Command::Fate(args) => fate::run(&args),
        Command::Stats(args) => stats::run(&args),
        Command::Activity(args) => activity::run(&args),
        Command::Integrate(args) => integrate::run(&args),
        Command::Fig3(args) => fig3::run(&args),
        Command::CompareFate(args) => compare_fate::run(&args),
        Command::Loading(args) => loading::run(&args),
        Command::Gensims(args) => gensims::run(&args),
    }
}
