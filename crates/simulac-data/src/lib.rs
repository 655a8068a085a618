#![deny(missing_docs)]
#![doc = "Loading of simulac run sets: data files, setup files and path metadata."]

/// Typed view of a setup file.
pub mod config;
pub mod expr;
/// Content digest of a loaded ensemble.
pub mod hash;
pub mod loader;
/// Labels parsed from the set path.
pub mod meta;
/// Setup file parsing and diagnostics.
pub mod setup;

use std::path::{Path, PathBuf};

use regex::Regex;
use simulac_core::{Ensemble, ErrorInfo, SimulacError};
use tracing::info;

pub use config::SetConfig;
pub use expr::{evaluate, SetupValue};
pub use hash::ensemble_digest;
pub use loader::{
    parse_run_table, read_run_file, read_set_data, LoadReport, SkipReason, SkippedFile,
    DEFAULT_DATA_PATTERN,
};
pub use meta::{RunMetadata, UNKNOWN};
pub use setup::{parse_setup, read_setup_file, SetupDiagnostic, SetupFile};

/// Setup file name written next to lambda run sets.
pub const DEFAULT_SETUP_FILE: &str = "lambda_setup.py";

/// Options for [`read_set`].
#[derive(Debug, Clone)]
pub struct SetOptions {
    /// Setup file name inside the set directory.
    pub setup_file: String,
    /// Pattern selecting run files.
    pub pattern: Regex,
}

impl SetOptions {
    /// Builds options from a setup file name and a file pattern.
    pub fn new(setup_file: impl Into<String>, pattern: &str) -> Result<Self, SimulacError> {
        let pattern = Regex::new(pattern).map_err(|err| {
            SimulacError::Config(
                ErrorInfo::new("bad_pattern", err.to_string()).with_context("pattern", pattern),
            )
        })?;
        Ok(Self {
            setup_file: setup_file.into(),
            pattern,
        })
    }
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            setup_file: DEFAULT_SETUP_FILE.to_string(),
            pattern: Regex::new(DEFAULT_DATA_PATTERN).expect("default data pattern is valid"),
        }
    }
}

/// A loaded run set: configuration plus ensemble.
#[derive(Debug, Clone)]
pub struct SimulationSet {
    /// Typed setup.
    pub config: SetConfig,
    /// Stacked runs.
    pub data: Ensemble,
    /// Files contributing to `data`, in run order.
    pub files: Vec<PathBuf>,
    /// Files left out while loading.
    pub skipped: Vec<SkippedFile>,
    /// Setup lines that were skipped.
    pub setup_diagnostics: Vec<SetupDiagnostic>,
}

/// Reads the setup file and every run file of a set directory.
pub fn read_set(dir: &Path, opts: &SetOptions) -> Result<SimulationSet, SimulacError> {
    let setup = read_setup_file(&dir.join(&opts.setup_file))?;
    let config = SetConfig::from_entries(dir, opts.setup_file.clone(), &setup.entries)?;
    let report = read_set_data(dir, &opts.pattern)?;
    let data = report.ensemble.ok_or_else(|| {
        SimulacError::Shape(
            ErrorInfo::new("empty_set", "no run files could be loaded")
                .with_path(dir)
                .with_context("pattern", opts.pattern.as_str()),
        )
    })?;
    let (runs, steps, vars) = data.shape();
    info!(
        path = %dir.display(),
        runs,
        steps,
        vars,
        skipped = report.skipped.len(),
        "read set"
    );
    Ok(SimulationSet {
        config,
        data,
        files: report.files,
        skipped: report.skipped,
        setup_diagnostics: setup.diagnostics,
    })
}
