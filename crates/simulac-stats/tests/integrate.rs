use approx::assert_abs_diff_eq;
use ndarray::array;
use simulac_core::Ensemble;
use simulac_stats::{integrate_concentration, integrate_ensemble};

#[test]
fn two_point_run_integrates_first_rectangle() {
    let run = array![[0.0, 1.0, 10.0], [1.0, 1.0, 10.0]];
    let value = integrate_concentration(run.view(), 2, 1, 0).expect("integral");
    assert_abs_diff_eq!(value, 10.0, epsilon = 1e-12);
}

#[test]
fn uneven_steps_and_volumes_use_left_values() {
    let run = array![[0.0, 2.0, 8.0], [1.0, 4.0, 8.0], [4.0, 1.0, 100.0]];
    let value = integrate_concentration(run.view(), 2, 1, 0).expect("integral");
    assert_abs_diff_eq!(value, 4.0 * 1.0 + 2.0 * 3.0, epsilon = 1e-12);
}

#[test]
fn single_row_integrates_to_zero() {
    let run = array![[0.0, 1.0, 10.0]];
    assert_eq!(integrate_concentration(run.view(), 2, 1, 0).expect("integral"), 0.0);
}

#[test]
fn ensemble_integrals_follow_run_order() {
    let a = array![[0.0, 1.0, 1.0], [2.0, 1.0, 1.0]];
    let b = array![[0.0, 1.0, 3.0], [2.0, 1.0, 3.0]];
    let ensemble = Ensemble::from_runs(&[a, b]).expect("ensemble");
    assert_eq!(integrate_ensemble(&ensemble, 2, 1, 0).expect("integrals"), vec![2.0, 6.0]);
    assert_eq!(
        integrate_ensemble(&ensemble, 5, 1, 0).expect_err("range").code(),
        "channel_out_of_range"
    );
}
