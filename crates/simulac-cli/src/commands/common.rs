use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use simulac_core::{to_canonical_json_bytes, SimulacError};
use simulac_data::{read_set, SetOptions, SimulationSet, DEFAULT_DATA_PATTERN, DEFAULT_SETUP_FILE};
use simulac_phage::FateParams;
use simulac_plot::FigureConfig;

/// Flags locating a run set on disk.
#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Directory holding the run files and the setup file.
    #[arg(long)]
    pub set: PathBuf,
    /// Setup file name inside the set directory.
    #[arg(long, default_value = DEFAULT_SETUP_FILE)]
    pub setup_file: String,
    /// Regex selecting run files by name.
    #[arg(long, default_value = DEFAULT_DATA_PATTERN)]
    pub pattern: String,
}

impl SetArgs {
    pub fn load(&self) -> Result<SimulationSet, SimulacError> {
        let opts = SetOptions::new(self.setup_file.as_str(), &self.pattern)?;
        read_set(&self.set, &opts)
    }
}

/// Thresholds of the PRE activity scan.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Activity above which PRE counts as active.
    #[arg(long, default_value_t = 1.0)]
    pub pre_min: f64,
    /// Time skipped before the scan starts.
    #[arg(long, default_value_t = 120.0)]
    pub warmup: f64,
    /// Length of the activity window.
    #[arg(long, default_value_t = 120.0)]
    pub window: f64,
    /// Contiguous active time needed to commit to lysogeny.
    #[arg(long, default_value_t = 240.0)]
    pub commit: f64,
}

impl ScanArgs {
    pub fn params(&self) -> FateParams {
        FateParams {
            pre_min: self.pre_min,
            warmup: self.warmup,
            window: self.window,
            commit: self.commit,
        }
    }
}

/// Output file and size of a rendered figure.
#[derive(Args, Debug, Clone)]
pub struct FigureArgs {
    /// SVG file to write.
    #[arg(long)]
    pub out: PathBuf,
    /// Figure title; defaults to the set labels.
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, default_value_t = 1200)]
    pub width: u32,
    #[arg(long, default_value_t = 900)]
    pub height: u32,
    /// Opacity of the shaded bands.
    #[arg(long, default_value_t = 0.25)]
    pub alpha: f64,
}

impl FigureArgs {
    pub fn config(&self) -> FigureConfig {
        FigureConfig {
            width: self.width,
            height: self.height,
            alpha: self.alpha,
        }
    }
}

/// Writes canonical JSON followed by a newline to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let bytes = to_canonical_json_bytes(value)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
