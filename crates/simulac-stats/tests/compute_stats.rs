use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};
use simulac_core::{Ensemble, SimulacError};
use simulac_data::{parse_setup, SetConfig};
use simulac_stats::{channel_stats, compute_stats};

fn config() -> SetConfig {
    let setup = parse_setup("time_index = 0;\nvolume_index = 1;\nspecies_CI_index = 2;\n");
    SetConfig::from_entries("/runs/set", "lambda_setup.py", &setup.entries).expect("config")
}

fn two_runs() -> Ensemble {
    let a: Array2<f64> = array![[0.0, 1.0, 2.0], [60.0, 2.0, 4.0], [120.0, 3.0, 6.0]];
    let b: Array2<f64> = array![[0.0, 1.0, 4.0], [60.0, 2.0, 8.0], [120.0, 3.0, 12.0]];
    Ensemble::from_runs(&[a, b]).expect("ensemble")
}

#[test]
fn normalised_stats_divide_before_aggregating() {
    let stats = compute_stats(&two_runs(), &config(), "CI", true).expect("stats");
    assert_eq!(stats.count, 2);
    for t in 0..3 {
        assert_abs_diff_eq!(stats.mean[t], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.std[t], 1.0, epsilon = 1e-12);
    }
}

#[test]
fn single_run_normalisation_matches_elementwise_division() {
    let run: Array2<f64> = array![[0.0, 1.0, 2.0], [60.0, 2.0, 4.0], [120.0, 3.0, 6.0]];
    let ensemble = Ensemble::from_runs(&[run]).expect("ensemble");
    let stats = compute_stats(&ensemble, &config(), "CI", true).expect("stats");
    assert_eq!(stats.mean.to_vec(), vec![2.0, 2.0, 2.0]);
    assert_eq!(stats.std.to_vec(), vec![0.0, 0.0, 0.0]);
}

#[test]
fn raw_stats_use_population_deviation() {
    let stats = compute_stats(&two_runs(), &config(), "CI", false).expect("stats");
    assert_eq!(stats.mean.to_vec(), vec![3.0, 6.0, 9.0]);
    assert_eq!(stats.std.to_vec(), vec![1.0, 2.0, 3.0]);
    assert_abs_diff_eq!(stats.stderr()[2], 3.0 / 2f64.sqrt(), epsilon = 1e-12);
    assert_abs_diff_eq!(stats.max_upper(), 12.0, epsilon = 1e-12);
}

#[test]
fn unknown_variable_is_a_lookup_error() {
    let err = compute_stats(&two_runs(), &config(), "Cro", false).expect_err("unknown");
    assert!(matches!(err, SimulacError::Lookup(_)));
    assert_eq!(err.code(), "variable_not_found");
}

#[test]
fn channel_stats_rejects_out_of_range_columns() {
    let err = channel_stats(&two_runs(), 9, None).expect_err("range");
    assert_eq!(err.code(), "channel_out_of_range");
}
