use ndarray::{array, Array2, Array3};
use simulac_core::{Ensemble, SimulacError};

fn run(offset: f64) -> Array2<f64> {
    array![[0.0, 1.0 + offset], [60.0, 2.0 + offset], [120.0, 3.0 + offset]]
}

#[test]
fn stacks_runs_along_leading_axis() {
    let ensemble = Ensemble::from_runs(&[run(0.0), run(10.0)]).expect("stack");
    assert_eq!(ensemble.shape(), (2, 3, 2));
    assert_eq!(ensemble.run(1)[[2, 1]], 13.0);
    let channel = ensemble.channel(1).expect("channel");
    assert_eq!(channel.dim(), (2, 3));
    assert_eq!(channel[[0, 0]], 1.0);
    assert_eq!(ensemble.time_axis(0).expect("time").to_vec(), vec![0.0, 60.0, 120.0]);
}

#[test]
fn rejects_mismatched_runs() {
    let short = array![[0.0, 1.0]];
    let err = Ensemble::from_runs(&[run(0.0), short]).expect_err("mismatch");
    assert!(matches!(err, SimulacError::Shape(_)));
    assert_eq!(err.code(), "run_shape_mismatch");
}

#[test]
fn rejects_empty_input() {
    assert!(Ensemble::from_runs(&[]).is_err());
    assert!(Ensemble::from_array(Array3::zeros((0, 3, 2))).is_err());
}

#[test]
fn select_builds_sub_ensembles() {
    let ensemble = Ensemble::from_runs(&[run(0.0), run(10.0), run(20.0)]).expect("stack");
    let subset = ensemble.select(&[2, 0]).expect("select").expect("non-empty");
    assert_eq!(subset.num_runs(), 2);
    assert_eq!(subset.run(0)[[0, 1]], 21.0);
    assert!(ensemble.select(&[]).expect("empty select").is_none());
    assert!(ensemble.select(&[5]).is_err());
}

#[test]
fn channel_lookup_is_bounds_checked() {
    let ensemble = Ensemble::from_runs(&[run(0.0)]).expect("stack");
    let err = ensemble.channel(7).expect_err("out of range");
    assert_eq!(err.code(), "channel_out_of_range");
}
