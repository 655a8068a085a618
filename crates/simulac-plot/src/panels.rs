//! Single-panel drawing: species distributions, promoter activity and raw traces.

use ndarray::ArrayView2;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use simulac_core::{Ensemble, ErrorInfo, SimulacError};
use simulac_data::SetConfig;
use simulac_phage::PhageConfig;
use simulac_stats::{activity_stats, channel_stats, SeriesStats};
use tracing::warn;

use crate::band::draw_shaded_band;
use crate::{plot_error, Chart};

/// Species shown in distribution panels unless told otherwise.
pub const DEFAULT_SPECIES: [&str; 6] = ["CICI", "CroCro", "CII", "CIII", "N", "Qa"];

/// Colours paired with [`DEFAULT_SPECIES`].
pub const SPECIES_COLORS: [RGBColor; 6] = [GREEN, MAGENTA, BLACK, CYAN, BLUE, RED];

/// How a distribution is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistStyle {
    /// Shade `mean ± std`.
    pub deviation: bool,
    /// Draw standard-error bars every this many points; 0 disables them.
    pub error_stride: usize,
    /// Band opacity.
    pub alpha: f64,
}

impl Default for DistStyle {
    fn default() -> Self {
        Self {
            deviation: true,
            error_stride: 0,
            alpha: 0.25,
        }
    }
}

impl DistStyle {
    /// Upper plot bound implied by this style.
    pub fn ceiling(&self, stats: &SeriesStats) -> f64 {
        if self.deviation {
            stats.max_upper()
        } else if self.error_stride > 0 {
            stats.max_upper_stderr()
        } else {
            stats.max_mean()
        }
    }
}

fn max_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(0.0, f64::max)
}

/// Draws one distribution and returns its concentration ceiling.
pub fn plot_distribution<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    time: &[f64],
    stats: &SeriesStats,
    color: &RGBColor,
    style: &DistStyle,
) -> Result<f64, SimulacError> {
    if time.len() != stats.len() {
        return Err(SimulacError::Plot(
            ErrorInfo::new("series_length_mismatch", "time axis and statistics differ in length")
                .with_context("time", time.len().to_string())
                .with_context("series", stats.len().to_string()),
        ));
    }
    let mean = stats.mean.to_vec();
    if style.deviation {
        let lower: Vec<f64> = stats.mean.iter().zip(stats.std.iter()).map(|(m, s)| m - s).collect();
        let upper: Vec<f64> = stats.mean.iter().zip(stats.std.iter()).map(|(m, s)| m + s).collect();
        draw_shaded_band(chart, time, &lower, &upper, color, style.alpha)?;
    }
    if style.error_stride > 0 {
        let stderr = stats.stderr();
        let bar_style = color.stroke_width(1);
        chart
            .draw_series((0..time.len()).step_by(style.error_stride).map(|i| {
                ErrorBar::new_vertical(
                    time[i],
                    mean[i] - stderr[i],
                    mean[i],
                    mean[i] + stderr[i],
                    bar_style,
                    6,
                )
            }))
            .map_err(plot_error)?;
    }
    chart
        .draw_series(LineSeries::new(
            time.iter().copied().zip(mean.iter().copied()),
            color.stroke_width(1),
        ))
        .map_err(plot_error)?;
    Ok(style.ceiling(stats))
}

/// Statistics of one species prepared for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesSeries {
    /// Species name.
    pub name: String,
    /// Line and band colour.
    pub color: RGBColor,
    /// Volume-normalised statistics.
    pub stats: SeriesStats,
}

/// Species distributions of one ensemble, time in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct DistPanel {
    /// Time axis in minutes.
    pub time: Vec<f64>,
    /// Species that were found, in request order.
    pub series: Vec<SpeciesSeries>,
}

fn time_minutes(ensemble: &Ensemble, time_index: usize) -> Result<Vec<f64>, SimulacError> {
    Ok(ensemble.time_axis(time_index)?.iter().map(|t| t / 60.0).collect())
}

impl DistPanel {
    /// Computes volume-normalised statistics for `species`. Names missing
    /// from the setup are skipped with a warning.
    pub fn from_ensemble(
        ensemble: &Ensemble,
        config: &SetConfig,
        species: &[&str],
    ) -> Result<Self, SimulacError> {
        let mut series = Vec::with_capacity(species.len());
        for (idx, &name) in species.iter().enumerate() {
            let Some(column) = config.species_index(name) else {
                warn!(species = name, "could not find variable; skipping species");
                continue;
            };
            series.push(SpeciesSeries {
                name: name.to_string(),
                color: SPECIES_COLORS[idx % SPECIES_COLORS.len()],
                stats: channel_stats(ensemble, column, Some(config.volume_index))?,
            });
        }
        Ok(Self {
            time: time_minutes(ensemble, config.time_index)?,
            series,
        })
    }

    /// `(t_max, c_max)` needed to show every series with `style`.
    pub fn extent(&self, style: &DistStyle) -> (f64, f64) {
        let t_max = max_or_zero(self.time.iter().copied());
        let c_max = max_or_zero(self.series.iter().map(|s| style.ceiling(&s.stats)));
        (t_max, c_max)
    }
}

/// Draws every series of `panel` with a legend entry and returns `(t_max, c_max)`.
pub fn dist_panel<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    panel: &DistPanel,
    style: &DistStyle,
) -> Result<(f64, f64), SimulacError> {
    let mut c_max: f64 = 0.0;
    for series in &panel.series {
        let ceiling = plot_distribution(chart, &panel.time, &series.stats, &series.color, style)?;
        if ceiling.is_finite() {
            c_max = c_max.max(ceiling);
        }
        let color = series.color;
        chart
            .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
            .map_err(plot_error)?
            .label(series.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));
    }
    Ok((max_or_zero(panel.time.iter().copied()), c_max))
}

/// Promoter activity rate of one ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPanel {
    /// Time axis in minutes.
    pub time: Vec<f64>,
    /// Rate statistics in launches per minute.
    pub stats: SeriesStats,
}

impl ActivityPanel {
    /// Rates summed over `channels` with a sliding `window` (time units).
    pub fn from_ensemble(
        ensemble: &Ensemble,
        config: &SetConfig,
        channels: &[usize],
        window: f64,
        scale: f64,
    ) -> Result<Self, SimulacError> {
        Ok(Self {
            time: time_minutes(ensemble, config.time_index)?,
            stats: activity_stats(ensemble, config, channels, window, scale)?,
        })
    }

    /// `(t_max, rate_max)` for `style`.
    pub fn extent(&self, style: &DistStyle) -> (f64, f64) {
        (max_or_zero(self.time.iter().copied()), style.ceiling(&self.stats).max(0.0))
    }
}

/// Draws an activity distribution and returns `(t_max, rate_max)`.
pub fn activity_panel<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    panel: &ActivityPanel,
    color: &RGBColor,
    style: &DistStyle,
) -> Result<(f64, f64), SimulacError> {
    let ceiling = plot_distribution(chart, &panel.time, &panel.stats, color, style)?;
    Ok((max_or_zero(panel.time.iter().copied()), ceiling.max(0.0)))
}

fn instance_traces(config: &PhageConfig) -> Vec<(&'static str, usize, RGBColor)> {
    let mut traces = vec![
        ("Cro2", config.cro2, MAGENTA),
        ("CI2", config.ci2, GREEN),
        ("CII", config.cii, BLACK),
        ("CIII", config.ciii, CYAN),
        ("N", config.n, BLUE),
    ];
    if let Some((name, column)) = config.q_like() {
        traces.push((name, column, RED));
    }
    traces
}

fn check_run(run: ArrayView2<'_, f64>, config: &PhageConfig) -> Result<(), SimulacError> {
    let needed = instance_traces(config)
        .into_iter()
        .map(|(_, column, _)| column)
        .chain([config.time_index()])
        .max()
        .unwrap_or(0);
    if needed >= run.ncols() {
        return Err(SimulacError::Lookup(
            ErrorInfo::new("channel_out_of_range", "variable index outside run")
                .with_context("index", needed.to_string())
                .with_context("variables", run.ncols().to_string()),
        ));
    }
    Ok(())
}

/// `(t_max, count_max)` of the raw traces of one run, time in minutes.
pub fn instance_extent(run: ArrayView2<'_, f64>, config: &PhageConfig) -> Result<(f64, f64), SimulacError> {
    check_run(run, config)?;
    let t_max = max_or_zero(run.column(config.time_index()).iter().map(|t| t / 60.0));
    let c_max = max_or_zero(
        instance_traces(config)
            .into_iter()
            .flat_map(|(_, column, _)| run.column(column).to_vec()),
    );
    Ok((t_max, c_max))
}

/// Raw molecule counts of one run. `legend` attaches series labels.
pub fn instance_panel<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    run: ArrayView2<'_, f64>,
    config: &PhageConfig,
    legend: bool,
) -> Result<(), SimulacError> {
    check_run(run, config)?;
    let time: Vec<f64> = run.column(config.time_index()).iter().map(|t| t / 60.0).collect();
    for (name, column, color) in instance_traces(config) {
        let anno = chart
            .draw_series(LineSeries::new(
                time.iter().copied().zip(run.column(column).iter().copied()),
                color.stroke_width(1),
            ))
            .map_err(plot_error)?;
        if legend {
            anno.label(name).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });
        }
    }
    Ok(())
}
