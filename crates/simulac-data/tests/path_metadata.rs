use std::path::Path;

use simulac_data::{RunMetadata, UNKNOWN};

#[test]
fn parses_conventional_set_paths() {
    let meta = RunMetadata::from_path(Path::new("/data/sims/LambdaQs_2010-05-11/lambda-20100511_1530"));
    assert_eq!(meta.set_name, "LambdaQs");
    assert_eq!(meta.set_date, "2010-05-11");
    assert_eq!(meta.run_name, "lambda");
    assert_eq!(meta.run_date, "20100511");
    assert_eq!(meta.run_time, "1530");
    assert!(meta.is_known());
    assert_eq!(meta.title(), "LambdaQs: 20100511, 1530");
}

#[test]
fn trailing_separator_is_ignored() {
    let meta = RunMetadata::from_path(Path::new("/d/Lambda_0511/run-0511_0900/"));
    assert_eq!(meta.set_name, "Lambda");
    assert_eq!(meta.run_time, "0900");
}

#[test]
fn unconventional_paths_fall_back_to_unknown() {
    let meta = RunMetadata::from_path(Path::new("results/latest"));
    assert_eq!(meta, RunMetadata::unknown());
    assert_eq!(meta.run_date, UNKNOWN);
    assert!(!meta.is_known());
}
