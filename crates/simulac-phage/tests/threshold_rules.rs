use ndarray::array;
use simulac_phage::{threshold_fate, ThresholdRule};

// Columns: time, volume, species.
fn run() -> ndarray::Array2<f64> {
    array![[0.0, 1.0, 2.0], [10.0, 2.0, 10.0], [20.0, 2.0, 4.0]]
}

#[test]
fn positive_thresholds_test_above() {
    let run = run();
    assert!(threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Max, 4.0).expect("max"));
    assert!(!threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Max, 5.0).expect("max"));
    assert!(threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Final, 1.5).expect("final"));
    assert!(!threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Final, 2.0).expect("final"));
    // 2 * 10 + 5 * 10 = 70
    assert!(threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Integral, 69.0).expect("integral"));
    assert!(!threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Integral, 70.0).expect("integral"));
}

#[test]
fn non_positive_thresholds_test_below() {
    let run = run();
    assert!(threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Max, -6.0).expect("max"));
    assert!(!threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Max, -5.0).expect("max"));
    assert!(!threshold_fate(run.view(), 2, 1, 0, ThresholdRule::Final, 0.0).expect("final"));
}

#[test]
fn out_of_range_species_fails() {
    let run = run();
    for rule in [ThresholdRule::Max, ThresholdRule::Final, ThresholdRule::Integral] {
        assert!(threshold_fate(run.view(), 7, 1, 0, rule, 1.0).is_err());
    }
}
