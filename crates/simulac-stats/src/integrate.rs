use ndarray::ArrayView2;
use simulac_core::{Ensemble, ErrorInfo, SimulacError};

/// Left-rectangle integral of `run[:, species] / run[:, volume]` over time.
///
/// A single-row run integrates to zero.
pub fn integrate_concentration(
    run: ArrayView2<'_, f64>,
    species: usize,
    volume: usize,
    time: usize,
) -> Result<f64, SimulacError> {
    let vars = run.ncols();
    if let Some(&bad) = [species, volume, time].iter().find(|&&col| col >= vars) {
        return Err(SimulacError::Lookup(
            ErrorInfo::new("channel_out_of_range", "variable index outside run")
                .with_context("index", bad.to_string())
                .with_context("variables", vars.to_string()),
        ));
    }
    let value = run
        .rows()
        .into_iter()
        .zip(run.rows().into_iter().skip(1))
        .map(|(row, next)| row[species] / row[volume] * (next[time] - row[time]))
        .sum();
    Ok(value)
}

/// [`integrate_concentration`] for every run of an ensemble.
pub fn integrate_ensemble(
    ensemble: &Ensemble,
    species: usize,
    volume: usize,
    time: usize,
) -> Result<Vec<f64>, SimulacError> {
    ensemble
        .runs()
        .map(|run| integrate_concentration(run, species, volume, time))
        .collect()
}
