//! Run and ensemble containers.
//!
//! A run is a `[timestep, variable]` table and an ensemble stacks runs of
//! identical shape along a leading run axis.

use ndarray::{stack, Array1, Array2, Array3, ArrayView2, Axis};

use crate::errors::{ErrorInfo, SimulacError};

fn shape_error(code: &str, message: impl Into<String>) -> SimulacError {
    SimulacError::Shape(ErrorInfo::new(code, message))
}

/// Stack of simulation runs indexed as `[run, timestep, variable]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    data: Array3<f64>,
}

impl Ensemble {
    /// Wraps an existing 3-D array. Every axis must be non-empty.
    pub fn from_array(data: Array3<f64>) -> Result<Self, SimulacError> {
        let (runs, steps, vars) = data.dim();
        if runs == 0 || steps == 0 || vars == 0 {
            return Err(SimulacError::Shape(
                ErrorInfo::new("empty_ensemble", "ensemble axes must be non-empty")
                    .with_context("shape", format!("{runs}x{steps}x{vars}")),
            ));
        }
        Ok(Self { data })
    }

    /// Stacks individual runs; all runs must share the shape of the first.
    pub fn from_runs(runs: &[Array2<f64>]) -> Result<Self, SimulacError> {
        let first = runs
            .first()
            .ok_or_else(|| shape_error("empty_ensemble", "no runs supplied"))?;
        for (idx, run) in runs.iter().enumerate() {
            if run.dim() != first.dim() {
                return Err(SimulacError::Shape(
                    ErrorInfo::new("run_shape_mismatch", "run shape differs from first run")
                        .with_context("run", idx.to_string())
                        .with_context("expected", format!("{:?}", first.dim()))
                        .with_context("found", format!("{:?}", run.dim())),
                ));
            }
        }
        let views: Vec<ArrayView2<'_, f64>> = runs.iter().map(|run| run.view()).collect();
        let data = stack(Axis(0), &views)
            .map_err(|err| shape_error("run_stack", err.to_string()))?;
        Self::from_array(data)
    }

    /// Number of runs in the ensemble.
    pub fn num_runs(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Number of timesteps shared by every run.
    pub fn num_steps(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Number of variables (columns) shared by every run.
    pub fn num_vars(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// `(runs, timesteps, variables)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Borrows a single run. Panics when `index` is out of range, like slice indexing.
    pub fn run(&self, index: usize) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(0), index)
    }

    /// Iterates over all runs in order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = ArrayView2<'_, f64>> + '_ {
        self.data.outer_iter()
    }

    /// Borrows one variable across all runs as a `[run, timestep]` view.
    pub fn channel(&self, var: usize) -> Result<ArrayView2<'_, f64>, SimulacError> {
        self.check_var(var)?;
        Ok(self.data.index_axis(Axis(2), var))
    }

    /// Time column of the first run.
    pub fn time_axis(&self, time_index: usize) -> Result<Array1<f64>, SimulacError> {
        self.check_var(time_index)?;
        Ok(self.data.index_axis(Axis(0), 0).column(time_index).to_owned())
    }

    /// Builds a sub-ensemble from the listed runs, `None` when the list is empty.
    pub fn select(&self, runs: &[usize]) -> Result<Option<Ensemble>, SimulacError> {
        if runs.is_empty() {
            return Ok(None);
        }
        if let Some(bad) = runs.iter().find(|&&idx| idx >= self.num_runs()) {
            return Err(SimulacError::Lookup(
                ErrorInfo::new("run_out_of_range", "run index outside ensemble")
                    .with_context("run", bad.to_string())
                    .with_context("runs", self.num_runs().to_string()),
            ));
        }
        Ok(Some(Self {
            data: self.data.select(Axis(0), runs),
        }))
    }

    /// Borrows the underlying array.
    pub fn as_array(&self) -> &Array3<f64> {
        &self.data
    }

    /// Consumes the ensemble and returns the underlying array.
    pub fn into_inner(self) -> Array3<f64> {
        self.data
    }

    fn check_var(&self, var: usize) -> Result<(), SimulacError> {
        if var >= self.num_vars() {
            return Err(SimulacError::Lookup(
                ErrorInfo::new("channel_out_of_range", "variable index outside ensemble")
                    .with_context("index", var.to_string())
                    .with_context("variables", self.num_vars().to_string()),
            ));
        }
        Ok(())
    }
}
