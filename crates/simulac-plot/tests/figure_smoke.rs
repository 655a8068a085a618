use std::fs;

use ndarray::Array2;
use simulac_core::Ensemble;
use simulac_data::{parse_setup, SetConfig};
use simulac_phage::{FateMethod, FateParams, PhageConfig};
use approx::assert_relative_eq;
use simulac_plot::{activity, compare_fate, fig3, loading, FigureConfig};

const SETUP: &str = "\
time_index = 0;
volume_index = 1;
species_CICI_index = 2;
species_CroCro_index = 3;
species_CII_index = 4;
species_CIII_index = 5;
species_N_index = 6;
species_Qa_index = 7;
species_RNAP_index = 8;
operator_OperatorPRE_0_index = 10;
operator_OperatorPL_0_index = 9;
promoter_PRE_index = 11;
";

fn set_config() -> SetConfig {
    let setup = parse_setup(SETUP);
    SetConfig::from_entries("/sims/Lambda_0511/lambda-0511_1200", "lambda_setup.py", &setup.entries)
        .expect("set config")
}

/// Sampled every 10 s; CI2 ends above Cro2 only when `ci2_wins`.
fn run(volume: f64, ci2_wins: bool, rate: f64) -> Array2<f64> {
    Array2::from_shape_fn((60, 12), |(t, col)| match col {
        0 => t as f64 * 10.0,
        1 => volume,
        2 if ci2_wins => 10.0 + (t % 5) as f64,
        2 => 1.0,
        3 => 5.0,
        4..=8 => 1.0 + (t % 7) as f64,
        11 => t as f64 * rate,
        _ => 0.0,
    })
}

fn ensemble() -> Ensemble {
    Ensemble::from_runs(&[run(0.4, true, 1.0), run(0.4, true, 0.0), run(1.8, false, 2.0)])
        .expect("ensemble")
}

fn small() -> FigureConfig {
    FigureConfig {
        width: 640,
        height: 480,
        ..FigureConfig::default()
    }
}

#[test]
fn fig3_writes_svg_and_reports_partition() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("fig3.svg");
    let phage = PhageConfig::from_set(&set_config()).expect("phage");
    let summary = fig3(
        &path,
        &ensemble(),
        &phage,
        FateMethod::Arkin,
        &FateParams::default(),
        None,
        &small(),
    )
    .expect("fig3");
    assert_eq!(summary.runs, 3);
    assert_eq!(summary.partition.lysogenic, vec![0]);
    assert_eq!(summary.partition.lytic, vec![1, 2]);
    assert!(summary.c_max > 0.0);
    let svg = fs::read_to_string(&path).expect("svg");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Lysogenic subpopulation (N = 1)"));
    // Legends of the instance panel and the distribution panel.
    assert!(svg.contains("Cro2"));
    assert!(svg.contains("CroCro"));
}

#[test]
fn compare_fate_writes_svg_with_one_column_per_method() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("compare.svg");
    let phage = PhageConfig::from_set(&set_config()).expect("phage");
    let comparison = compare_fate(
        &path,
        &ensemble(),
        &phage,
        &FateMethod::DEFAULT_COMPARISON,
        &FateParams::default(),
        &small(),
    )
    .expect("compare");
    assert_eq!(comparison.volumes, vec![0.4, 1.8]);
    assert_eq!(comparison.outcomes.len(), 3);
    let svg = fs::read_to_string(&path).expect("svg");
    assert!(svg.contains("PRE active"));
}

#[test]
fn loading_requires_an_rnap_species() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("loading.svg");
    loading(&path, &ensemble(), &set_config(), Some("loading"), &small()).expect("loading");
    assert!(fs::read_to_string(&path).expect("svg").contains("RNAP count"));

    let setup = parse_setup("time_index = 0;\nvolume_index = 1;\n");
    let bare = SetConfig::from_entries("scratch", "lambda_setup.py", &setup.entries).expect("set");
    let err = loading(&dir.path().join("none.svg"), &ensemble(), &bare, None, &small())
        .expect_err("no RNAP");
    assert_eq!(err.code(), "variable_not_found");
}

#[test]
fn activity_figure_plots_launch_rates_per_minute() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("activity.svg");
    let panel = activity(&path, &ensemble(), &set_config(), &[11], 120.0, 1.0, None, &small())
        .expect("activity");
    assert_eq!(panel.time.len(), 60);
    assert_relative_eq!(panel.time[6], 1.0);
    assert_relative_eq!(panel.stats.mean[11], 0.0);
    assert_relative_eq!(panel.stats.mean[12], 6.0);
    assert_relative_eq!(panel.stats.mean[59], 6.0);
    let svg = fs::read_to_string(&path).expect("svg");
    assert!(svg.contains("Launches per minute"));
    assert!(svg.contains("Lambda: 0511, 1200"));
}
