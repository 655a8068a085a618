use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use simulac_data::{ensemble_digest, RunMetadata, SetupDiagnostic, SkippedFile};
use simulac_phage::PhageConfig;
use tracing::warn;

use super::common::{print_json, SetArgs};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub set: SetArgs,
}

#[derive(Debug, Serialize)]
struct SetSummary {
    path: PathBuf,
    metadata: RunMetadata,
    runs: usize,
    steps: usize,
    variables: usize,
    digest: String,
    species: BTreeMap<String, usize>,
    moi: Option<usize>,
    files: Vec<PathBuf>,
    skipped: Vec<SkippedFile>,
    setup_diagnostics: Vec<SetupDiagnostic>,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let set = args.set.load()?;
    let (runs, steps, variables) = set.data.shape();
    let moi = match PhageConfig::from_set(&set.config) {
        Ok(phage) => Some(phage.moi),
        Err(err) => {
            warn!(%err, "set has no lambda bindings; MOI not reported");
            None
        }
    };
    let summary = SetSummary {
        path: set.config.path.clone(),
        metadata: set.config.metadata(),
        runs,
        steps,
        variables,
        digest: ensemble_digest(&set.data),
        species: set.config.species.clone(),
        moi,
        files: set.files,
        skipped: set.skipped,
        setup_diagnostics: set.setup_diagnostics,
    };
    print_json(&summary)
}
