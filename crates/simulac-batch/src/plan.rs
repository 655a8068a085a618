//! Batch plan: which volumes and trials to simulate and where to put them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};

/// `count` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count).map(|idx| start + step * idx as f64).collect()
        }
    }
}

/// Shortest rendering with six significant digits, like C's `%g`: the
/// exponent form carries a sign and at least two digits (`1.23457e+06`).
pub fn format_volume(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let sci = format!("{value:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = match exp.parse() {
        Ok(exponent) => exponent,
        Err(_) => return sci,
    };
    if !(-4..6).contains(&exponent) {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }
    let decimals = (5 - exponent).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn default_volumes() -> Vec<f64> {
    linspace(0.4, 1.8, 8)
}

fn default_trials() -> usize {
    8
}

fn default_labels() -> Vec<String> {
    ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]
        .iter()
        .map(|label| label.to_string())
        .collect()
}

fn default_subdir() -> PathBuf {
    PathBuf::from(".")
}

fn default_executable() -> String {
    "Simulac".into()
}

fn default_config_file() -> String {
    "lambda.cfg".into()
}

fn default_setup_file() -> String {
    "lambda_setup.py".into()
}

fn default_debug_level() -> u32 {
    3
}

fn default_conf_dir() -> String {
    "../config".into()
}

/// Grid of simulator invocations. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    /// Relative cell volumes, one label each.
    #[serde(default = "default_volumes")]
    pub volumes: Vec<f64>,
    /// Trials per volume.
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Number of the first trial in output names.
    #[serde(default)]
    pub trial0: usize,
    /// Output labels, consumed in volume order.
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    /// Directory holding inputs, outputs and the batch log.
    #[serde(default = "default_subdir")]
    pub subdir: PathBuf,
    /// Simulator executable.
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Simulator configuration file inside `subdir`.
    #[serde(default = "default_config_file")]
    pub config_file: String,
    /// Setup script inside `subdir`.
    #[serde(default = "default_setup_file")]
    pub setup_file: String,
    /// Simulator debug level (`-d`).
    #[serde(default = "default_debug_level")]
    pub debug_level: u32,
    /// Exported as `SIMULAC_CONFDIR` for the simulator.
    #[serde(default = "default_conf_dir")]
    pub conf_dir: String,
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self {
            volumes: default_volumes(),
            trials: default_trials(),
            trial0: 0,
            labels: default_labels(),
            subdir: default_subdir(),
            executable: default_executable(),
            config_file: default_config_file(),
            setup_file: default_setup_file(),
            debug_level: default_debug_level(),
            conf_dir: default_conf_dir(),
        }
    }
}

/// One simulator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    /// Relative cell volume.
    pub volume: f64,
    /// Label of the volume.
    pub label: String,
    /// Trial number within the volume, starting at 0.
    pub trial: usize,
    /// Data file written by the simulator.
    pub output: PathBuf,
    /// Per-run simulator log.
    pub log: PathBuf,
}

impl BatchPlan {
    /// Checks that every volume has a label.
    pub fn validate(&self) -> Result<(), SimulacError> {
        if self.volumes.len() > self.labels.len() {
            return Err(SimulacError::Batch(
                ErrorInfo::new("not_enough_labels", "more volumes than output labels")
                    .with_context("volumes", self.volumes.len().to_string())
                    .with_context("labels", self.labels.len().to_string())
                    .with_hint("add labels or drop volumes from the plan"),
            ));
        }
        Ok(())
    }

    /// Jobs in volume-major order.
    pub fn jobs(&self) -> Result<Vec<BatchJob>, SimulacError> {
        self.validate()?;
        let mut jobs = Vec::with_capacity(self.volumes.len() * self.trials);
        for (volume, label) in self.volumes.iter().zip(&self.labels) {
            for trial in 0..self.trials {
                let stem = format!("lambda-{label}{}", trial + self.trial0);
                jobs.push(BatchJob {
                    volume: *volume,
                    label: label.clone(),
                    trial,
                    output: self.subdir.join(format!("{stem}.dat")),
                    log: self.subdir.join(format!("{stem}.log")),
                });
            }
        }
        Ok(jobs)
    }
}

/// Reads a YAML plan; missing fields take their defaults.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<BatchPlan, SimulacError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        SimulacError::Io(
            ErrorInfo::new("plan_read", err.to_string()).with_path(path),
        )
    })?;
    serde_yaml::from_slice(&bytes).map_err(|err| {
        SimulacError::Serde(
            ErrorInfo::new("yaml_deserialize", err.to_string()).with_path(path),
        )
    })
}
