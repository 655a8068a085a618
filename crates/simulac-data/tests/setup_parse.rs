use simulac_data::{parse_setup, read_setup_file, SetupValue};

const SETUP: &str = "\
# generated by Simulac
config_file = 'lambda.cfg';
time_index = 0;
volume_index = 3 + 4;

   # indented comment
% legacy matlab line
species_CICI_index = 12; # trailing text
cell_growth_rate = 1 / 2100;
this is not a statement
broken = 1 +;
= 5;
";

#[test]
fn parses_assignments_and_skips_noise() {
    let setup = parse_setup(SETUP);
    assert_eq!(setup.entries.get("time_index"), Some(&SetupValue::Int(0)));
    assert_eq!(setup.entries.get("volume_index"), Some(&SetupValue::Int(7)));
    assert_eq!(setup.entries.get("species_CICI_index"), Some(&SetupValue::Int(12)));
    assert_eq!(
        setup.entries.get("config_file"),
        Some(&SetupValue::Str("lambda.cfg".into()))
    );
    let rate = setup
        .entries
        .get("cell_growth_rate")
        .and_then(SetupValue::as_f64)
        .expect("rate");
    assert!((rate - 1.0 / 2100.0).abs() < 1e-15);
    assert_eq!(setup.entries.len(), 5);
}

#[test]
fn records_diagnostics_for_skipped_lines() {
    let setup = parse_setup(SETUP);
    let lines: Vec<usize> = setup.diagnostics.iter().map(|diag| diag.line).collect();
    assert_eq!(lines, vec![7, 10, 11, 12]);
    assert!(setup.diagnostics[0].reason.contains("MATLAB"));
}

#[test]
fn later_assignments_override_earlier_ones() {
    let setup = parse_setup("x = 1;\nx = 2;\n");
    assert_eq!(setup.entries.get("x"), Some(&SetupValue::Int(2)));
}

#[test]
fn missing_setup_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let err = read_setup_file(&dir.path().join("lambda_setup.py")).expect_err("missing");
    assert_eq!(err.code(), "setup_read");
}

#[test]
fn entries_are_keyed_by_name_and_later_assignments_win() {
    let setup = parse_setup("volume_index = 1;\ntime_index = 0;\ntime_index = 2;\n");
    let names: Vec<&str> = setup.entries.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["time_index", "volume_index"]);
    assert_eq!(setup.entries["time_index"], SetupValue::Int(2));
}
