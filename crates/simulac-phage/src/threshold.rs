//! Single-species fate rules.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};
use simulac_stats::integrate_concentration;

/// Statistic of `species / volume` compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdRule {
    /// Maximum over the run.
    Max,
    /// Value at the final timestep.
    Final,
    /// Time integral (left rectangle rule).
    Integral,
}

/// Applies `rule`. A positive threshold tests `value > threshold`; otherwise
/// the test is `value < -threshold`.
pub fn threshold_fate(
    run: ArrayView2<'_, f64>,
    species: usize,
    volume: usize,
    time: usize,
    rule: ThresholdRule,
    threshold: f64,
) -> Result<bool, SimulacError> {
    let value = match rule {
        ThresholdRule::Integral => integrate_concentration(run, species, volume, time)?,
        ThresholdRule::Max | ThresholdRule::Final => {
            if species >= run.ncols() || volume >= run.ncols() {
                return Err(SimulacError::Lookup(
                    ErrorInfo::new("channel_out_of_range", "variable index outside run")
                        .with_context("variables", run.ncols().to_string()),
                ));
            }
            let concentration = &run.column(species) / &run.column(volume);
            match rule {
                ThresholdRule::Max => concentration.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                _ => concentration.last().copied().ok_or_else(|| {
                    SimulacError::Shape(ErrorInfo::new("empty_run", "run has no timesteps"))
                })?,
            }
        }
    };
    Ok(if threshold > 0.0 {
        value > threshold
    } else {
        value < -threshold
    })
}
