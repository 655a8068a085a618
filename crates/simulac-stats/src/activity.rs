//! Sliding-window transcription rates from cumulative RNAP counts.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use simulac_core::{Ensemble, ErrorInfo, SimulacError};
use simulac_data::SetConfig;
use tracing::debug;

use crate::series::SeriesStats;

/// Quantised window derived from the sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityWindow {
    /// Sampling interval taken from the first run.
    pub step: f64,
    /// Window length in rows, `floor(window / step)`.
    pub rows: usize,
    /// Factor applied to count differences; yields events per minute.
    pub scale: f64,
}

fn numeric_error(code: &str, message: &str) -> SimulacError {
    SimulacError::Numeric(ErrorInfo::new(code, message))
}

impl ActivityWindow {
    /// Derives the window for `ensemble`, folding `scale`, window quantisation
    /// and the per-minute unit into one factor.
    pub fn for_ensemble(
        ensemble: &Ensemble,
        time_index: usize,
        window: f64,
        scale: f64,
    ) -> Result<Self, SimulacError> {
        let time = ensemble.time_axis(time_index)?;
        if time.len() < 2 {
            return Err(numeric_error(
                "too_few_timesteps",
                "at least two timesteps are needed to derive the time step",
            ));
        }
        let step = time[1] - time[0];
        if !(step > 0.0) {
            return Err(SimulacError::Numeric(
                ErrorInfo::new("non_positive_step", "time step must be positive")
                    .with_context("step", step.to_string()),
            ));
        }
        if !(window > 0.0) {
            return Err(numeric_error("non_positive_window", "window must be positive"));
        }
        let rows = (window / step).floor() as usize;
        if rows == 0 {
            return Err(SimulacError::Numeric(
                ErrorInfo::new("window_too_short", "window is shorter than one time step")
                    .with_context("window", window.to_string())
                    .with_context("step", step.to_string()),
            ));
        }
        let scale = scale * (window / step) / rows as f64 * (60.0 / window);
        Ok(Self { step, rows, scale })
    }
}

/// Per-run rate table `[run, timestep]`. Rows before the first full window are zero.
pub fn activity_rates(
    ensemble: &Ensemble,
    config: &SetConfig,
    channels: &[usize],
    window: f64,
    scale: f64,
) -> Result<Array2<f64>, SimulacError> {
    if channels.is_empty() {
        return Err(SimulacError::Lookup(ErrorInfo::new(
            "empty_channel_list",
            "activity needs at least one count channel",
        )));
    }
    let win = ActivityWindow::for_ensemble(ensemble, config.time_index, window, scale)?;
    let mut counts = Array2::<f64>::zeros((ensemble.num_runs(), ensemble.num_steps()));
    for &channel in channels {
        counts += &ensemble.channel(channel)?;
    }
    let mut rates = Array2::<f64>::zeros(counts.raw_dim());
    for t in win.rows..counts.len_of(Axis(1)) {
        let diff = &counts.column(t) - &counts.column(t - win.rows);
        rates.column_mut(t).assign(&(diff * win.scale));
    }
    debug!(
        channels = channels.len(),
        winsize = win.rows,
        scale = win.scale,
        "computed activity rates"
    );
    Ok(rates)
}

/// Mean and population std of the activity rate across runs.
pub fn activity_stats(
    ensemble: &Ensemble,
    config: &SetConfig,
    channels: &[usize],
    window: f64,
    scale: f64,
) -> Result<SeriesStats, SimulacError> {
    let rates = activity_rates(ensemble, config, channels, window, scale)?;
    SeriesStats::across_runs(rates.view())
}
