use std::fs;

use simulac_batch::{command_args, run_batch, BatchJob, BatchPlan, JobState, Launcher, LOG_FILE};
use simulac_core::{ErrorInfo, SimulacError};

/// Writes the output file instead of running the simulator.
#[derive(Default)]
struct FakeLauncher {
    launched: Vec<String>,
    fail_label: Option<String>,
}

impl Launcher for FakeLauncher {
    fn launch(&mut self, _plan: &BatchPlan, job: &BatchJob) -> Result<(), SimulacError> {
        self.launched.push(job.output.display().to_string());
        if self.fail_label.as_deref() == Some(job.label.as_str()) {
            return Err(SimulacError::Batch(ErrorInfo::new("launch_failed", "fake failure")));
        }
        fs::write(&job.output, "0 1\n").map_err(|err| {
            SimulacError::Io(ErrorInfo::new("fake_write", err.to_string()))
        })
    }
}

fn plan(dir: &std::path::Path) -> BatchPlan {
    BatchPlan {
        volumes: vec![0.5, 1.5],
        trials: 2,
        subdir: dir.to_path_buf(),
        ..BatchPlan::default()
    }
}

#[test]
fn second_run_skips_existing_outputs_and_appends_log() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let plan = plan(dir.path());
    let mut launcher = FakeLauncher::default();

    let first = run_batch(&plan, &mut launcher).expect("first batch");
    assert_eq!(first.count(&JobState::Complete), 4);
    assert_eq!(launcher.launched.len(), 4);

    let second = run_batch(&plan, &mut launcher).expect("second batch");
    assert_eq!(second.count(&JobState::Skipped), 4);
    assert_eq!(launcher.launched.len(), 4);

    let log = fs::read_to_string(dir.path().join(LOG_FILE)).expect("log");
    assert_eq!(log.matches("-------").count(), 2);
    assert_eq!(log.matches("Nvolumes=2, Ntrials=2, Trial0=0").count(), 2);
    assert_eq!(log.matches("volume=").count(), 4);
    assert!(log.contains("volume=1.5, trial=1 -> "));
}

#[test]
fn launcher_failures_are_recorded_and_batch_continues() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let plan = plan(dir.path());
    let mut launcher = FakeLauncher {
        fail_label: Some("a".into()),
        ..FakeLauncher::default()
    };
    let report = run_batch(&plan, &mut launcher).expect("batch");
    assert_eq!(report.count(&JobState::Failed), 2);
    assert_eq!(report.count(&JobState::Complete), 2);
    assert!(report.outcomes[0].error.as_deref().unwrap_or_default().contains("fake failure"));
    assert!(dir.path().join("lambda-b1.dat").exists());
}

#[test]
fn invalid_plan_touches_nothing() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let plan = BatchPlan {
        labels: vec!["a".into()],
        ..plan(dir.path())
    };
    let mut launcher = FakeLauncher::default();
    let err = run_batch(&plan, &mut launcher).expect_err("invalid");
    assert!(matches!(err, SimulacError::Batch(_)));
    assert!(!dir.path().join(LOG_FILE).exists());
    assert!(launcher.launched.is_empty());
}

#[test]
fn process_arguments_follow_simulator_flags() {
    let plan = BatchPlan {
        subdir: "runs".into(),
        ..BatchPlan::default()
    };
    let job = &plan.jobs().expect("jobs")[1];
    assert_eq!(
        command_args(&plan, job),
        vec![
            "-v",
            "0.4",
            "--config-file=runs/lambda.cfg",
            "--python-setup=runs/lambda_setup.py",
            "-o",
            "runs/lambda-a1.dat",
            "-d",
            "3",
            "-l",
            "runs/lambda-a1.log",
        ]
    );
}
