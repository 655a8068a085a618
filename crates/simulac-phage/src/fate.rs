//! Lysis/lysogeny decision for individual runs.
//!
//! The PRE scan follows Arkin et al. (1998): a cell commits to lysogeny when
//! PRE averages more than one open complex per two minutes over a contiguous
//! four-minute period and `[CI2] > [Cro2]` at the end of the cell cycle.

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use simulac_core::{Ensemble, ErrorInfo, Fate, SimulacError};
use tracing::{debug, info, warn};

use crate::columns::{OperatorFamily, PromoterFamily};
use crate::setup::PhageConfig;

/// Operator state counted by the legacy occupancy measure.
const OPEN_COMPLEX_STATE: f64 = 3.0;

/// Strategy used to decide a run's fate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FateMethod {
    /// PRE activation followed by a final `[CI2] > [Cro2]` check.
    Arkin,
    /// PRE activation alone.
    PreActive,
    /// Final `[CI2] > [Cro2]` alone.
    FinalDimer,
    /// Mean number of PRE operators in the open-complex state, plus the
    /// final dimer check. Measures occupancy rather than launches.
    LegacyOccupancy,
}

impl FateMethod {
    /// Methods compared by default.
    pub const DEFAULT_COMPARISON: [FateMethod; 3] =
        [FateMethod::Arkin, FateMethod::PreActive, FateMethod::FinalDimer];

    /// Numeric code used in serialized output.
    pub const fn code(self) -> u8 {
        match self {
            FateMethod::Arkin => 0,
            FateMethod::PreActive => 1,
            FateMethod::FinalDimer => 2,
            FateMethod::LegacyOccupancy => 3,
        }
    }

    /// Inverse of [`FateMethod::code`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FateMethod::Arkin),
            1 => Some(FateMethod::PreActive),
            2 => Some(FateMethod::FinalDimer),
            3 => Some(FateMethod::LegacyOccupancy),
            _ => None,
        }
    }

    /// Figure label.
    pub fn label(self) -> &'static str {
        match self {
            FateMethod::Arkin => "Arkin",
            FateMethod::PreActive => "PRE active",
            FateMethod::FinalDimer => "CI2 > Cro",
            FateMethod::LegacyOccupancy => "PRE occupancy",
        }
    }
}

impl fmt::Display for FateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FateMethod::Arkin => "arkin",
            FateMethod::PreActive => "pre-active",
            FateMethod::FinalDimer => "final-dimer",
            FateMethod::LegacyOccupancy => "legacy-occupancy",
        };
        f.write_str(name)
    }
}

impl FromStr for FateMethod {
    type Err = SimulacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s {
            "arkin" | "0" => FateMethod::Arkin,
            "pre-active" | "1" => FateMethod::PreActive,
            "final-dimer" | "2" => FateMethod::FinalDimer,
            "legacy-occupancy" | "3" => FateMethod::LegacyOccupancy,
            other => {
                return Err(SimulacError::Config(
                    ErrorInfo::new("unknown_fate_method", format!("unknown fate method '{other}'"))
                        .with_hint("use arkin, pre-active, final-dimer or legacy-occupancy"),
                ))
            }
        };
        Ok(method)
    }
}

impl Serialize for FateMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for FateMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        FateMethod::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid fate method {code}")))
    }
}

/// Thresholds and time spans of the PRE scan, in simulation time units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FateParams {
    /// Activity that counts as PRE being active.
    pub pre_min: f64,
    /// Time skipped before the scan starts.
    pub warmup: f64,
    /// Length of the activity window.
    pub window: f64,
    /// Contiguous active time required to commit.
    pub commit: f64,
}

impl Default for FateParams {
    fn default() -> Self {
        Self {
            pre_min: 1.0,
            warmup: 120.0,
            window: 120.0,
            commit: 240.0,
        }
    }
}

fn check_columns(run: ArrayView2<'_, f64>, columns: &[usize]) -> Result<(), SimulacError> {
    if let Some(&bad) = columns.iter().find(|&&col| col >= run.ncols()) {
        return Err(SimulacError::Lookup(
            ErrorInfo::new("channel_out_of_range", "variable index outside run")
                .with_context("index", bad.to_string())
                .with_context("variables", run.ncols().to_string()),
        ));
    }
    Ok(())
}

fn row_sum(run: ArrayView2<'_, f64>, row: usize, columns: &[usize]) -> f64 {
    columns.iter().map(|&col| run[[row, col]]).sum()
}

/// Launches over rows `start..end`: last row total minus first row total.
fn launch_activity(run: ArrayView2<'_, f64>, start: usize, end: usize, columns: &[usize]) -> f64 {
    if start >= end {
        return 0.0;
    }
    row_sum(run, end - 1, columns) - row_sum(run, start, columns)
}

/// Mean count of operators in the open-complex state over rows `start..end`.
fn occupancy_activity(run: ArrayView2<'_, f64>, start: usize, end: usize, columns: &[usize]) -> f64 {
    if start >= end {
        return 0.0;
    }
    let open: usize = (start..end)
        .map(|row| {
            columns
                .iter()
                .filter(|&&col| run[[row, col]] == OPEN_COMPLEX_STATE)
                .count()
        })
        .sum();
    open as f64 / (end - start) as f64
}

/// Classifies one run `[timestep, variable]`.
pub fn classify(
    run: ArrayView2<'_, f64>,
    config: &PhageConfig,
    method: FateMethod,
    params: &FateParams,
) -> Result<Fate, SimulacError> {
    let rows = run.nrows();
    if rows == 0 {
        return Err(SimulacError::Shape(ErrorInfo::new(
            "empty_run",
            "cannot classify a run without timesteps",
        )));
    }
    let time = config.time_index();
    check_columns(run, &[time, config.ci2, config.cro2])?;
    let final_dimer = run[[rows - 1, config.ci2]] > run[[rows - 1, config.cro2]];

    if method == FateMethod::FinalDimer {
        return Ok(Fate::from_lysogeny(final_dimer));
    }
    if rows < 2 {
        return Ok(Fate::Lytic);
    }
    let columns = match method {
        FateMethod::FinalDimer | FateMethod::Arkin | FateMethod::PreActive => {
            PromoterFamily::Pre.columns(&config.set, config.moi)?
        }
        FateMethod::LegacyOccupancy => OperatorFamily::Pre.columns(&config.set, config.moi)?,
    };
    check_columns(run, &columns)?;
    let step = run[[1, time]] - run[[0, time]];
    if !(step > 0.0) {
        warn!(step, "non-positive time step; treating run as lytic");
        return Ok(Fate::Lytic);
    }

    let mut active = false;
    let mut active_since = run[[0, time]];
    for i in 0..rows {
        let now = run[[i, time]];
        if (i as f64) * step < params.warmup {
            continue;
        }
        let start = (i as f64 - params.window / step).round().clamp(0.0, i as f64) as usize;
        let activity = match method {
            FateMethod::LegacyOccupancy => occupancy_activity(run, start, i, &columns),
            _ => launch_activity(run, start, i, &columns),
        };
        let above = activity > params.pre_min;
        if above && !active {
            active_since = now;
            active = true;
        }
        if !above {
            active = false;
        }
        if active && now - active_since > params.commit {
            debug!(%method, row = i, time = now, "PRE activation committed");
            let lysogenic = method == FateMethod::PreActive || final_dimer;
            return Ok(Fate::from_lysogeny(lysogenic));
        }
    }
    Ok(Fate::Lytic)
}

/// Classifies every run of an ensemble in order.
pub fn set_fates(
    ensemble: &Ensemble,
    config: &PhageConfig,
    method: FateMethod,
    params: &FateParams,
) -> Result<Vec<Fate>, SimulacError> {
    let fates = ensemble
        .runs()
        .map(|run| classify(run, config, method, params))
        .collect::<Result<Vec<_>, _>>()?;
    let lysogens = fates.iter().filter(|fate| fate.is_lysogenic()).count();
    info!(%method, runs = fates.len(), lysogens, "classified fates");
    Ok(fates)
}

/// Run indices split by fate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatePartition {
    /// Runs that lysed.
    pub lytic: Vec<usize>,
    /// Runs that became lysogens.
    pub lysogenic: Vec<usize>,
}

impl FatePartition {
    /// Splits run indices according to `fates`.
    pub fn from_fates(fates: &[Fate]) -> Self {
        let (lysogenic, lytic): (Vec<usize>, Vec<usize>) =
            (0..fates.len()).partition(|&idx| fates[idx].is_lysogenic());
        Self { lytic, lysogenic }
    }

    /// Number of classified runs.
    pub fn total(&self) -> usize {
        self.lytic.len() + self.lysogenic.len()
    }

    /// Share of lysogenic runs, 0 when empty.
    pub fn lysogenic_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.lysogenic.len() as f64 / total as f64,
        }
    }
}
