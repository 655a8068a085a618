use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use simulac_phage::{PhageConfig, PromoterFamily};
use simulac_plot::{activity, FigureConfig};
use simulac_stats::activity_stats;
use tracing::info;

use super::common::{print_json, SetArgs};

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Promoter {
    Pre,
    Pr,
    Pl,
    Prm,
}

impl From<Promoter> for PromoterFamily {
    fn from(value: Promoter) -> Self {
        match value {
            Promoter::Pre => PromoterFamily::Pre,
            Promoter::Pr => PromoterFamily::Pr,
            Promoter::Pl => PromoterFamily::Pl,
            Promoter::Prm => PromoterFamily::Prm,
        }
    }
}

#[derive(Args, Debug)]
pub struct ActivityArgs {
    #[command(flatten)]
    pub set: SetArgs,
    /// Promoter whose RNAP launch counts are differenced.
    #[arg(long, value_enum, default_value_t = Promoter::Pre)]
    pub promoter: Promoter,
    /// Sliding window length in simulation time units.
    #[arg(long, default_value_t = 120.0)]
    pub window: f64,
    /// Extra factor applied to every rate.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,
    /// Write the series as CSV instead of printing JSON.
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Also render the rate distribution to this SVG file.
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

pub fn run(args: &ActivityArgs) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    let config = PhageConfig::from_set(&set.config)?;
    let family = PromoterFamily::from(args.promoter);
    let channels = family.columns(&set.config, config.moi)?;
    let stats = match &args.svg {
        Some(path) => {
            activity(
                path,
                &set.data,
                &set.config,
                &channels,
                args.window,
                args.scale,
                None,
                &FigureConfig::default(),
            )?
            .stats
        }
        None => activity_stats(&set.data, &set.config, &channels, args.window, args.scale)?,
    };
    let time = set.data.time_axis(set.config.time_index)?;
    match &args.csv {
        Some(path) => {
            stats.write_csv(path, time.view())?;
            info!(path = %path.display(), promoter = family.name(), "wrote activity");
            Ok(())
        }
        None => print_json(&stats.rows(time.view())?),
    }
}
