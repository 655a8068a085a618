mod support;

use approx::assert_abs_diff_eq;
use simulac_core::{Ensemble, Fate};
use simulac_phage::{compare_fates, set_fates, FateMethod, FateParams, FatePartition};
use support::{phage_config, run};

fn with_volume(mut data: ndarray::Array2<f64>, volume: f64) -> ndarray::Array2<f64> {
    data.column_mut(1).fill(volume);
    data
}

fn ensemble() -> Ensemble {
    Ensemble::from_runs(&[
        with_volume(run(60, 0.0, 1.0, 9.0, 1.0), 0.4),
        with_volume(run(60, f64::INFINITY, 1.0, 9.0, 1.0), 0.4),
        with_volume(run(60, 0.0, 1.0, 1.0, 9.0), 1.8),
        with_volume(run(60, 0.0, 1.0, 9.0, 1.0), 1.8),
    ])
    .expect("ensemble")
}

#[test]
fn set_fates_classifies_in_run_order() {
    let fates = set_fates(&ensemble(), &phage_config(), FateMethod::Arkin, &FateParams::default())
        .expect("fates");
    assert_eq!(fates, vec![Fate::Lysogenic, Fate::Lytic, Fate::Lytic, Fate::Lysogenic]);
    let partition = FatePartition::from_fates(&fates);
    assert_eq!(partition.lysogenic, vec![0, 3]);
    assert_eq!(partition.lytic, vec![1, 2]);
    assert_abs_diff_eq!(partition.lysogenic_fraction(), 0.5);
    assert_eq!(FatePartition::default().lysogenic_fraction(), 0.0);
}

#[test]
fn comparison_groups_by_initial_volume() {
    let comparison = compare_fates(
        &ensemble(),
        &phage_config(),
        &FateMethod::DEFAULT_COMPARISON,
        &FateParams::default(),
    )
    .expect("comparison");
    assert_eq!(comparison.volumes, vec![0.4, 1.8]);
    assert_eq!(comparison.initial_volumes, vec![0.4, 0.4, 1.8, 1.8]);
    assert_eq!(comparison.outcomes.len(), 3);

    let arkin = &comparison.outcomes[0];
    assert_eq!(arkin.label, "Arkin");
    assert_eq!(arkin.mean_by_volume, vec![0.5, 0.5]);
    assert_abs_diff_eq!(arkin.stderr_by_volume[0], 0.5 / 2f64.sqrt(), epsilon = 1e-12);

    let pre_active = &comparison.outcomes[1];
    assert_eq!(pre_active.mean_by_volume, vec![0.5, 1.0]);
    assert_eq!(pre_active.stderr_by_volume[1], 0.0);
    assert_abs_diff_eq!(pre_active.lysogenic_fraction, 0.75);

    let final_dimer = &comparison.outcomes[2];
    assert_eq!(final_dimer.partition.lytic, vec![2]);
}
