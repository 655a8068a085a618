//! Fate methods side by side, grouped by initial cell volume.

use serde::{Deserialize, Serialize};
use simulac_core::{Ensemble, Fate, SimulacError};
use tracing::info;

use crate::fate::{set_fates, FateMethod, FateParams, FatePartition};
use crate::setup::PhageConfig;

/// Result of one method over the whole ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodOutcome {
    /// Method applied.
    pub method: FateMethod,
    /// Figure label of the method.
    pub label: String,
    /// Fate of every run.
    pub fates: Vec<Fate>,
    /// Runs split by fate.
    pub partition: FatePartition,
    /// Share of lysogenic runs.
    pub lysogenic_fraction: f64,
    /// Mean fate code for each entry of [`FateComparison::volumes`].
    pub mean_by_volume: Vec<f64>,
    /// Standard error of the fate code for each volume.
    pub stderr_by_volume: Vec<f64>,
}

/// Per-method fates and lysogeny as a function of initial volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FateComparison {
    /// Volume column at the first timestep of each run.
    pub initial_volumes: Vec<f64>,
    /// Distinct initial volumes in ascending order.
    pub volumes: Vec<f64>,
    /// One entry per requested method.
    pub outcomes: Vec<MethodOutcome>,
}

/// Runs every method over the ensemble and aggregates fates per volume.
pub fn compare_fates(
    ensemble: &Ensemble,
    config: &PhageConfig,
    methods: &[FateMethod],
    params: &FateParams,
) -> Result<FateComparison, SimulacError> {
    let initial_volumes: Vec<f64> = ensemble.channel(config.volume_index())?.column(0).to_vec();
    let mut volumes = initial_volumes.clone();
    volumes.sort_by(f64::total_cmp);
    volumes.dedup();

    let groups: Vec<Vec<usize>> = volumes
        .iter()
        .map(|&volume| {
            (0..initial_volumes.len())
                .filter(|&run| initial_volumes[run] == volume)
                .collect()
        })
        .collect();

    let mut outcomes = Vec::with_capacity(methods.len());
    for &method in methods {
        let fates = set_fates(ensemble, config, method, params)?;
        let (mean_by_volume, stderr_by_volume): (Vec<f64>, Vec<f64>) = groups
            .iter()
            .map(|runs| mean_and_stderr(runs.iter().map(|&run| f64::from(fates[run].code()))))
            .unzip();
        let partition = FatePartition::from_fates(&fates);
        info!(
            %method,
            lytic = partition.lytic.len(),
            lysogenic = partition.lysogenic.len(),
            "compared fate method"
        );
        outcomes.push(MethodOutcome {
            method,
            label: method.label().to_string(),
            lysogenic_fraction: partition.lysogenic_fraction(),
            fates,
            partition,
            mean_by_volume,
            stderr_by_volume,
        });
    }
    Ok(FateComparison {
        initial_volumes,
        volumes,
        outcomes,
    })
}

fn mean_and_stderr(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let variance = values.map(|value| (value - mean).powi(2)).sum::<f64>() / n as f64;
    (mean, variance.sqrt() / (n as f64).sqrt())
}
