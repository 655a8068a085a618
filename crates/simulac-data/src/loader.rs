//! Loading of per-run data files into an [`Ensemble`].

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use regex::Regex;
use serde::{Deserialize, Serialize};
use simulac_core::{Ensemble, ErrorInfo, SimulacError};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Default pattern for run files inside a set directory.
pub const DEFAULT_DATA_PATTERN: &str = r".*\.dat";

/// Reason a candidate run file was left out of the ensemble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SkipReason {
    /// Row count differs from the first loaded file.
    RunLengthMismatch {
        /// Rows of the first loaded file.
        expected: usize,
        /// Rows of the skipped file.
        found: usize,
    },
    /// Column count differs from the first loaded file.
    VariableCountMismatch {
        /// Columns of the first loaded file.
        expected: usize,
        /// Columns of the skipped file.
        found: usize,
    },
    /// The file could not be read or parsed.
    Unreadable {
        /// Underlying diagnostic.
        message: String,
    },
}

/// File skipped while loading a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Path of the skipped file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of scanning a set directory.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Stacked runs, `None` when no file could be loaded.
    pub ensemble: Option<Ensemble>,
    /// Files that made it into the ensemble, in run order.
    pub files: Vec<PathBuf>,
    /// Files that were skipped.
    pub skipped: Vec<SkippedFile>,
}

fn parse_error(code: &str, line: usize, message: impl Into<String>) -> SimulacError {
    SimulacError::Parse(ErrorInfo::new(code, message).with_line(line))
}

/// Parses a whitespace-delimited numeric table.
///
/// `%` starts a comment that runs to the end of the line, lines starting
/// with `!` are simulator column headers, and blank lines are ignored.
pub fn parse_run_table(text: &str) -> Result<Array2<f64>, SimulacError> {
    let mut values = Vec::new();
    let mut rows = 0usize;
    let mut cols: Option<usize> = None;
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('%').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }
        let before = values.len();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                SimulacError::Parse(
                    ErrorInfo::new("bad_number", format!("could not parse '{token}'"))
                        .with_line(idx + 1),
                )
            })?;
            values.push(value);
        }
        let width = values.len() - before;
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(parse_error(
                    "ragged_row",
                    idx + 1,
                    format!("expected {expected} columns, found {width}"),
                ));
            }
            Some(_) => {}
        }
        rows += 1;
    }
    let cols = cols.ok_or_else(|| parse_error("empty_table", 0, "no data rows"))?;
    Array2::from_shape_vec((rows, cols), values)
        .map_err(|err| parse_error("table_shape", rows, err.to_string()))
}

/// Reads and parses a single run file.
pub fn read_run_file(path: &Path) -> Result<Array2<f64>, SimulacError> {
    let text = fs::read_to_string(path).map_err(|err| {
        SimulacError::Io(
            ErrorInfo::new("run_read", err.to_string()).with_path(path),
        )
    })?;
    parse_run_table(&text).map_err(|err| match err {
        SimulacError::Parse(info) => {
            SimulacError::Parse(info.with_path(path))
        }
        other => other,
    })
}

/// Loads every file in `dir` whose name matches `pattern`.
///
/// Files are visited in file-name order. The first file that parses fixes
/// the run shape; later files with a different shape, and files that fail
/// to parse, are skipped with a warning.
pub fn read_set_data(dir: &Path, pattern: &Regex) -> Result<LoadReport, SimulacError> {
    if !dir.is_dir() {
        return Err(SimulacError::Io(
            ErrorInfo::new("set_dir_missing", "set directory does not exist").with_path(dir),
        ));
    }
    let mut runs: Vec<Array2<f64>> = Vec::new();
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| {
            SimulacError::Io(
                ErrorInfo::new("set_dir_walk", err.to_string()).with_path(dir),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !pattern.is_match(&name) {
            continue;
        }
        let path = entry.path().to_path_buf();
        let run = match read_run_file(&path) {
            Ok(run) => run,
            Err(err) => {
                warn!(file = %path.display(), %err, "unreadable run file; skipping file");
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::Unreadable {
                        message: err.to_string(),
                    },
                });
                continue;
            }
        };
        if let Some(first) = runs.first() {
            let (expected_rows, expected_cols) = first.dim();
            let (rows, cols) = run.dim();
            let reason = if rows != expected_rows {
                warn!(file = %path.display(), "run length mismatch; skipping file");
                Some(SkipReason::RunLengthMismatch {
                    expected: expected_rows,
                    found: rows,
                })
            } else if cols != expected_cols {
                warn!(file = %path.display(), "variable count mismatch; skipping file");
                Some(SkipReason::VariableCountMismatch {
                    expected: expected_cols,
                    found: cols,
                })
            } else {
                None
            };
            if let Some(reason) = reason {
                skipped.push(SkippedFile { path, reason });
                continue;
            }
        }
        debug!(file = %path.display(), "loaded run");
        runs.push(run);
        files.push(path);
    }
    let ensemble = if runs.is_empty() {
        None
    } else {
        Some(Ensemble::from_runs(&runs)?)
    };
    Ok(LoadReport {
        ensemble,
        files,
        skipped,
    })
}
