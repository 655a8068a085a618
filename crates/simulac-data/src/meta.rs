use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Placeholder used when the set path does not follow the naming convention.
pub const UNKNOWN: &str = "Unknown";

fn path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^.*/(.*)_(.*)/(.*)-(.*)_(.*)$").expect("path pattern is valid")
    })
}

/// Labels encoded in `.../<set>_<setdate>/<run>-<rundate>_<runtime>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Name of the simulation set (e.g. `LambdaQs`).
    pub set_name: String,
    /// Date stamp of the set directory.
    pub set_date: String,
    /// Name of the run directory.
    pub run_name: String,
    /// Date stamp of the run.
    pub run_date: String,
    /// Time stamp of the run.
    pub run_time: String,
}

impl RunMetadata {
    /// Metadata with every field set to [`UNKNOWN`].
    pub fn unknown() -> Self {
        Self {
            set_name: UNKNOWN.into(),
            set_date: UNKNOWN.into(),
            run_name: UNKNOWN.into(),
            run_date: UNKNOWN.into(),
            run_time: UNKNOWN.into(),
        }
    }

    /// Extracts labels from a set path, falling back to [`RunMetadata::unknown`].
    pub fn from_path(path: &Path) -> Self {
        let text = path.to_string_lossy();
        let text = text.trim_end_matches('/');
        match path_pattern().captures(text) {
            Some(caps) => Self {
                set_name: caps[1].to_string(),
                set_date: caps[2].to_string(),
                run_name: caps[3].to_string(),
                run_date: caps[4].to_string(),
                run_time: caps[5].to_string(),
            },
            None => {
                warn!(path = %path.display(), "can't process set path; using placeholder metadata");
                Self::unknown()
            }
        }
    }

    /// True when the labels came from a matching path.
    pub fn is_known(&self) -> bool {
        self.set_name != UNKNOWN
    }

    /// Default figure title, `"<set>: <date>, <time>"`.
    pub fn title(&self) -> String {
        format!("{}: {}, {}", self.set_name, self.run_date, self.run_time)
    }
}
