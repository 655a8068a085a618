//! Per-timestep mean and spread of a quantity across runs.

use std::path::Path;

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};

/// Mean and population standard deviation at every timestep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Arithmetic mean across runs.
    pub mean: Array1<f64>,
    /// Population standard deviation across runs (ddof 0).
    pub std: Array1<f64>,
    /// Number of runs aggregated.
    pub count: usize,
}

/// One exported row of a [`SeriesStats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    /// Time stamp of the row.
    pub time: f64,
    /// Mean value.
    pub mean: f64,
    /// Standard deviation.
    pub std: f64,
    /// Standard error of the mean.
    pub stderr: f64,
}

fn max_of(values: &Array1<f64>) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

impl SeriesStats {
    /// Aggregates a `[run, timestep]` table along the run axis.
    pub fn across_runs(values: ArrayView2<'_, f64>) -> Result<Self, SimulacError> {
        let count = values.len_of(Axis(0));
        let mean = values.mean_axis(Axis(0)).ok_or_else(|| {
            SimulacError::Shape(ErrorInfo::new("no_runs", "cannot aggregate zero runs"))
        })?;
        let std = values.std_axis(Axis(0), 0.0);
        Ok(Self { mean, std, count })
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// True when no timesteps are present.
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Standard error of the mean, `std / sqrt(count)`.
    pub fn stderr(&self) -> Array1<f64> {
        let scale = (self.count.max(1) as f64).sqrt();
        self.std.mapv(|value| value / scale)
    }

    /// Largest mean value.
    pub fn max_mean(&self) -> f64 {
        max_of(&self.mean)
    }

    /// `max(mean) + max(std)`, the upper plot bound for a deviation band.
    pub fn max_upper(&self) -> f64 {
        self.max_mean() + max_of(&self.std)
    }

    /// `max(mean) + max(stderr)`, the upper plot bound for error bars.
    pub fn max_upper_stderr(&self) -> f64 {
        self.max_mean() + max_of(&self.stderr())
    }

    /// Pairs every timestep with its time stamp.
    pub fn rows(&self, time: ArrayView1<'_, f64>) -> Result<Vec<SeriesRow>, SimulacError> {
        if time.len() != self.len() {
            return Err(SimulacError::Shape(
                ErrorInfo::new("series_length_mismatch", "time axis and series differ in length")
                    .with_context("time", time.len().to_string())
                    .with_context("series", self.len().to_string()),
            ));
        }
        let stderr = self.stderr();
        Ok(time
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()).zip(stderr.iter()))
            .map(|(&time, ((&mean, &std), &stderr))| SeriesRow {
                time,
                mean,
                std,
                stderr,
            })
            .collect())
    }

    /// Writes `time,mean,std,stderr` rows to a CSV file.
    pub fn write_csv(&self, path: &Path, time: ArrayView1<'_, f64>) -> Result<(), SimulacError> {
        let rows = self.rows(time)?;
        let csv_error = |err: csv::Error| {
            SimulacError::Io(
                ErrorInfo::new("csv_write", err.to_string()).with_path(path),
            )
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        for row in rows {
            writer.serialize(row).map_err(csv_error)?;
        }
        writer.flush().map_err(|err| {
            SimulacError::Io(
                ErrorInfo::new("csv_write", err.to_string()).with_path(path),
            )
        })
    }
}
