use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};
use tracing::warn;

use crate::expr::{evaluate, SetupValue};

fn statement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\S*)\s*=\s*(.*);").expect("statement pattern is valid"))
}

/// Why a setup line was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupDiagnostic {
    /// One-based line number.
    pub line: usize,
    /// Raw line content without the trailing newline.
    pub text: String,
    /// Short description of the problem.
    pub reason: String,
}

/// Parsed contents of a setup file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetupFile {
    /// Name to value bindings, ordered by name. A repeated name keeps its last value.
    pub entries: BTreeMap<String, SetupValue>,
    /// Lines that were skipped with a diagnostic.
    pub diagnostics: Vec<SetupDiagnostic>,
}

/// Parses `name = expression;` statements. Bad lines are skipped, never fatal.
pub fn parse_setup(text: &str) -> SetupFile {
    let mut setup = SetupFile::default();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('%') {
            warn!(line = line_no, "found line starting with %; MATLAB file?");
            setup.diagnostics.push(SetupDiagnostic {
                line: line_no,
                text: raw.to_string(),
                reason: "legacy MATLAB-style line".into(),
            });
            continue;
        }
        let Some(captures) = statement_pattern().captures(line) else {
            warn!(line = line_no, text = raw, "couldn't parse setup line");
            setup.diagnostics.push(SetupDiagnostic {
                line: line_no,
                text: raw.to_string(),
                reason: "not a `name = expression;` statement".into(),
            });
            continue;
        };
        let name = &captures[1];
        if name.is_empty() {
            warn!(line = line_no, text = raw, "setup statement has an empty name");
            setup.diagnostics.push(SetupDiagnostic {
                line: line_no,
                text: raw.to_string(),
                reason: "empty name".into(),
            });
            continue;
        }
        match evaluate(&captures[2]) {
            Ok(value) => {
                setup.entries.insert(name.to_string(), value);
            }
            Err(err) => {
                warn!(line = line_no, %err, "couldn't evaluate setup expression");
                setup.diagnostics.push(SetupDiagnostic {
                    line: line_no,
                    text: raw.to_string(),
                    reason: err.info().message.clone(),
                });
            }
        }
    }
    setup
}

/// Reads and parses a setup file from disk.
pub fn read_setup_file(path: &Path) -> Result<SetupFile, SimulacError> {
    let text = fs::read_to_string(path).map_err(|err| {
        SimulacError::Io(
            ErrorInfo::new("setup_read", err.to_string()).with_path(path),
        )
    })?;
    Ok(parse_setup(&text))
}
