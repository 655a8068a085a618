#![deny(missing_docs)]
#![doc = "Per-timestep statistics over ensembles of simulac runs."]

pub mod activity;
/// Time integrals of species concentrations.
pub mod integrate;
pub mod series;

use ndarray::Array2;
use simulac_core::{Ensemble, SimulacError};
use simulac_data::SetConfig;

pub use activity::{activity_rates, activity_stats, ActivityWindow};
pub use integrate::{integrate_concentration, integrate_ensemble};
pub use series::{SeriesRow, SeriesStats};

/// Statistics of one variable across runs, optionally divided by the volume column.
pub fn channel_stats(
    ensemble: &Ensemble,
    var: usize,
    volume: Option<usize>,
) -> Result<SeriesStats, SimulacError> {
    let channel = ensemble.channel(var)?;
    let values: Array2<f64> = match volume {
        Some(volume) => &channel / &ensemble.channel(volume)?,
        None => channel.to_owned(),
    };
    SeriesStats::across_runs(values.view())
}

/// Mean and population standard deviation of a named species.
///
/// `variable` resolves through `species_<variable>_index`. With
/// `normalize_by_volume` every run's channel is divided element-wise by
/// its volume column before aggregating.
pub fn compute_stats(
    ensemble: &Ensemble,
    config: &SetConfig,
    variable: &str,
    normalize_by_volume: bool,
) -> Result<SeriesStats, SimulacError> {
    let species = config.require_species(variable)?;
    let volume = normalize_by_volume.then_some(config.volume_index);
    channel_stats(ensemble, species, volume)
}
