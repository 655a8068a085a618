//! Multi-panel SVG figures.

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use simulac_core::{Ensemble, Fate, SimulacError};
use simulac_data::SetConfig;
use simulac_phage::{
    compare_fates, set_fates, FateComparison, FateMethod, FateParams, FatePartition, PhageConfig,
};
use simulac_stats::compute_stats;
use tracing::info;

use crate::band::draw_shaded_band;
use crate::panels::{
    activity_panel, dist_panel, instance_extent, instance_panel, plot_distribution, ActivityPanel,
    DistPanel, DistStyle, DEFAULT_SPECIES,
};
use crate::{plot_error, Chart, FigureConfig};

const CAPTION_FONT: (&str, u32) = ("sans-serif", 16);

/// Counts and axis limits of a rendered [`fig3`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fig3Summary {
    /// Fate method used to split the population.
    pub method: FateMethod,
    /// Runs in the ensemble.
    pub runs: usize,
    /// Fate of every run.
    pub fates: Vec<Fate>,
    /// Runs split by fate.
    pub partition: FatePartition,
    /// Shared time limit of the distribution panels, minutes.
    pub t_max: f64,
    /// Shared concentration limit of the distribution panels.
    pub c_max: f64,
}

fn axis_limit(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

fn panel_chart<'a, 'b>(
    area: &'a DrawingArea<SVGBackend<'b>, Shift>,
    caption: &str,
    x: Range<f64>,
    y: Range<f64>,
    x_desc: &str,
    y_desc: &str,
) -> Result<Chart<'a, SVGBackend<'b>>, SimulacError> {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(x, y)
        .map_err(plot_error)?;
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
        .map_err(plot_error)?;
    Ok(chart)
}

fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, SVGBackend<'b>>) -> Result<(), SimulacError> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)
}

fn open_root<'b>(
    path: &'b Path,
    fig: &FigureConfig,
) -> Result<DrawingArea<SVGBackend<'b>, Shift>, SimulacError> {
    let root = SVGBackend::new(path, (fig.width, fig.height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;
    Ok(root)
}

fn subpopulation(
    ensemble: &Ensemble,
    config: &SetConfig,
    runs: &[usize],
) -> Result<Option<DistPanel>, SimulacError> {
    ensemble
        .select(runs)?
        .map(|sub| DistPanel::from_ensemble(&sub, config, &DEFAULT_SPECIES))
        .transpose()
}

/// Raw traces of every run, then the species distributions of all cells,
/// lytic cells and lysogenic cells on common axes.
pub fn fig3(
    path: &Path,
    ensemble: &Ensemble,
    config: &PhageConfig,
    method: FateMethod,
    params: &FateParams,
    title: Option<&str>,
    fig: &FigureConfig,
) -> Result<Fig3Summary, SimulacError> {
    let fates = set_fates(ensemble, config, method, params)?;
    let partition = FatePartition::from_fates(&fates);
    let style = DistStyle {
        alpha: fig.alpha,
        ..DistStyle::default()
    };

    let all = DistPanel::from_ensemble(ensemble, &config.set, &DEFAULT_SPECIES)?;
    let lytic = subpopulation(ensemble, &config.set, &partition.lytic)?;
    let lysogenic = subpopulation(ensemble, &config.set, &partition.lysogenic)?;
    let (t_max, c_max) = [Some(&all), lytic.as_ref(), lysogenic.as_ref()]
        .into_iter()
        .flatten()
        .map(|panel| panel.extent(&style))
        .fold((0.0_f64, 0.0_f64), |(t, c), (pt, pc)| (t.max(pt), c.max(pc)));

    let mut inst_t: f64 = 0.0;
    let mut inst_c: f64 = 0.0;
    for run in ensemble.runs() {
        let (t, c) = instance_extent(run, config)?;
        inst_t = inst_t.max(t);
        inst_c = inst_c.max(c);
    }

    let root = open_root(path, fig)?;
    let panels = root.split_evenly((2, 2));
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| config.metadata.title());

    let mut chart = panel_chart(
        &panels[0],
        &title,
        0.0..axis_limit(inst_t),
        0.0..axis_limit(inst_c),
        "",
        "Molecule count",
    )?;
    let last = ensemble.num_runs() - 1;
    for (idx, run) in ensemble.runs().enumerate() {
        instance_panel(&mut chart, run, config, idx == last)?;
    }
    draw_legend(&mut chart)?;

    let x = 0.0..axis_limit(t_max);
    let y = 0.0..axis_limit(c_max);
    let mut chart = panel_chart(
        &panels[1],
        &format!("All cells (N = {})", ensemble.num_runs()),
        x.clone(),
        y.clone(),
        "",
        "Nanomolar",
    )?;
    dist_panel(&mut chart, &all, &style)?;
    draw_legend(&mut chart)?;

    for (area, caption, panel) in [
        (
            &panels[2],
            format!("Lytic subpopulation (N = {})", partition.lytic.len()),
            lytic.as_ref(),
        ),
        (
            &panels[3],
            format!("Lysogenic subpopulation (N = {})", partition.lysogenic.len()),
            lysogenic.as_ref(),
        ),
    ] {
        let mut chart = panel_chart(area, &caption, x.clone(), y.clone(), "Time (min)", "Nanomolar")?;
        if let Some(panel) = panel {
            dist_panel(&mut chart, panel, &style)?;
        }
    }
    root.present().map_err(plot_error)?;

    info!(
        path = %path.display(),
        runs = ensemble.num_runs(),
        lytic = partition.lytic.len(),
        lysogenic = partition.lysogenic.len(),
        "wrote fig3"
    );
    Ok(Fig3Summary {
        method,
        runs: ensemble.num_runs(),
        fates,
        partition,
        t_max,
        c_max,
    })
}

/// Lysogen distributions, lytic distributions and lysogeny against initial
/// volume, one column per fate method.
pub fn compare_fate(
    path: &Path,
    ensemble: &Ensemble,
    config: &PhageConfig,
    methods: &[FateMethod],
    params: &FateParams,
    fig: &FigureConfig,
) -> Result<FateComparison, SimulacError> {
    let comparison = compare_fates(ensemble, config, methods, params)?;
    let style = DistStyle {
        alpha: fig.alpha,
        ..DistStyle::default()
    };
    let all = DistPanel::from_ensemble(ensemble, &config.set, &DEFAULT_SPECIES)?;
    let (t_max, c_max) = all.extent(&style);
    let x = 0.0..axis_limit(t_max);
    let y = 0.0..axis_limit(c_max);

    let v_min = comparison.volumes.first().copied().unwrap_or(0.0);
    let v_max = comparison.volumes.last().copied().unwrap_or(1.0);
    let volume_axis = if v_max > v_min {
        v_min..v_max
    } else {
        v_min - 0.5..v_max + 0.5
    };

    let root = open_root(path, fig)?;
    let columns = comparison.outcomes.len().max(1);
    let panels = root.split_evenly((3, columns));
    for (col, outcome) in comparison.outcomes.iter().enumerate() {
        let lysogens = subpopulation(ensemble, &config.set, &outcome.partition.lysogenic)?;
        let lytics = subpopulation(ensemble, &config.set, &outcome.partition.lytic)?;

        let caption = format!(
            "{} ({:.0}% lysogenic)",
            outcome.label,
            100.0 * outcome.lysogenic_fraction
        );
        let y_desc = if col == 0 { "Lysogens, nanomolar" } else { "" };
        let mut chart = panel_chart(&panels[col], &caption, x.clone(), y.clone(), "", y_desc)?;
        if let Some(panel) = &lysogens {
            dist_panel(&mut chart, panel, &style)?;
        }

        let y_desc = if col == 0 { "Lytics, nanomolar" } else { "" };
        let mut chart = panel_chart(
            &panels[columns + col],
            "",
            x.clone(),
            y.clone(),
            "Time (min)",
            y_desc,
        )?;
        if let Some(panel) = &lytics {
            dist_panel(&mut chart, panel, &style)?;
        }

        let y_desc = if col == 0 { "Fraction lysogenic" } else { "" };
        let mut chart = panel_chart(
            &panels[2 * columns + col],
            "",
            volume_axis.clone(),
            0.0..1.0,
            "Volume factor",
            y_desc,
        )?;
        let lower: Vec<f64> = outcome
            .mean_by_volume
            .iter()
            .zip(&outcome.stderr_by_volume)
            .map(|(m, e)| m - e)
            .collect();
        let upper: Vec<f64> = outcome
            .mean_by_volume
            .iter()
            .zip(&outcome.stderr_by_volume)
            .map(|(m, e)| m + e)
            .collect();
        draw_shaded_band(&mut chart, &comparison.volumes, &lower, &upper, &BLUE, fig.alpha)?;
        chart
            .draw_series(LineSeries::new(
                comparison
                    .volumes
                    .iter()
                    .copied()
                    .zip(outcome.mean_by_volume.iter().copied()),
                BLUE.stroke_width(2),
            ))
            .map_err(plot_error)?;
    }
    root.present().map_err(plot_error)?;
    info!(path = %path.display(), methods = methods.len(), "wrote fate comparison");
    Ok(comparison)
}

/// Mean RNAP count and mean RNAP concentration over time.
pub fn loading(
    path: &Path,
    ensemble: &Ensemble,
    config: &SetConfig,
    title: Option<&str>,
    fig: &FigureConfig,
) -> Result<(), SimulacError> {
    let counts = compute_stats(ensemble, config, "RNAP", false)?;
    let concentration = compute_stats(ensemble, config, "RNAP", true)?;
    let time = ensemble.time_axis(config.time_index)?.to_vec();
    let t_max = axis_limit(time.iter().copied().fold(0.0, f64::max));
    let style = DistStyle {
        deviation: false,
        error_stride: 0,
        alpha: fig.alpha,
    };

    let root = open_root(path, fig)?;
    let panels = root.split_evenly((1, 2));
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| config.metadata().title());

    let mut chart = panel_chart(
        &panels[0],
        &title,
        0.0..t_max,
        0.0..axis_limit(counts.max_mean()),
        "Time",
        "RNAP count",
    )?;
    plot_distribution(&mut chart, &time, &counts, &RED, &style)?;

    let mut chart = panel_chart(
        &panels[1],
        "",
        0.0..t_max,
        0.0..axis_limit(concentration.max_mean()),
        "Time",
        "RNAP concentration",
    )?;
    plot_distribution(&mut chart, &time, &concentration, &RED, &style)?;
    root.present().map_err(plot_error)?;
    info!(path = %path.display(), "wrote loading figure");
    Ok(())
}

/// Windowed launch rate summed over `channels`, one panel.
#[allow(clippy::too_many_arguments)]
pub fn activity(
    path: &Path,
    ensemble: &Ensemble,
    config: &SetConfig,
    channels: &[usize],
    window: f64,
    scale: f64,
    title: Option<&str>,
    fig: &FigureConfig,
) -> Result<ActivityPanel, SimulacError> {
    let panel = ActivityPanel::from_ensemble(ensemble, config, channels, window, scale)?;
    let style = DistStyle {
        alpha: fig.alpha,
        ..DistStyle::default()
    };
    let (t_max, rate_max) = panel.extent(&style);
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| config.metadata().title());

    let root = open_root(path, fig)?;
    let mut chart = panel_chart(
        &root,
        &title,
        0.0..axis_limit(t_max),
        0.0..axis_limit(rate_max),
        "Time (min)",
        "Launches per minute",
    )?;
    activity_panel(&mut chart, &panel, &BLUE, &style)?;
    root.present().map_err(plot_error)?;
    info!(path = %path.display(), channels = channels.len(), "wrote activity figure");
    Ok(panel)
}
