//! Structured error types shared across simulac crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PATH_KEY: &str = "path";
const LINE_KEY: &str = "line";

/// Code, message and context of a failure. `path` and `line` context
/// entries are rendered as a location rather than as plain pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Snake-case code, matched on by callers and tests.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Extra detail such as the file, the line, the setup key or the column.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How to fix the input, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the file or directory the error refers to.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().display().to_string();
        self.with_context(PATH_KEY, path)
    }

    /// Records a one-based line number inside the file.
    pub fn with_line(self, line: usize) -> Self {
        self.with_context(LINE_KEY, line.to_string())
    }

    /// Sets a hint for fixing the input.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// `path:line`, `path` or `line N`, when either is recorded.
    pub fn location(&self) -> Option<String> {
        match (self.context.get(PATH_KEY), self.context.get(LINE_KEY)) {
            (Some(path), Some(line)) => Some(format!("{path}:{line}")),
            (Some(path), None) => Some(path.clone()),
            (None, Some(line)) => Some(format!("line {line}")),
            (None, None) => None,
        }
    }
}

/// Canonical error type for simulac analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SimulacError {
    /// Filesystem and process errors.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Malformed data files or setup statements.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Missing or invalid configuration entries.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Run or ensemble shape violations.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// Unresolvable variable names or channel indices.
    #[error("lookup error: {0}")]
    Lookup(ErrorInfo),
    /// Numerical preconditions that do not hold (time step, window size).
    #[error("numeric error: {0}")]
    Numeric(ErrorInfo),
    /// Figure rendering errors.
    #[error("plot error: {0}")]
    Plot(ErrorInfo),
    /// Batch generation errors.
    #[error("batch error: {0}")]
    Batch(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(location) = self.location() {
            write!(f, " at {location}")?;
        }
        let mut rest = self
            .context
            .iter()
            .filter(|(key, _)| key.as_str() != PATH_KEY && key.as_str() != LINE_KEY)
            .peekable();
        if rest.peek().is_some() {
            let pairs: Vec<String> = rest.map(|(key, value)| format!("{key}={value}")).collect();
            write!(f, " ({})", pairs.join(", "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {hint}")?;
        }
        Ok(())
    }
}

impl SimulacError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SimulacError::Io(info)
            | SimulacError::Parse(info)
            | SimulacError::Config(info)
            | SimulacError::Shape(info)
            | SimulacError::Lookup(info)
            | SimulacError::Numeric(info)
            | SimulacError::Plot(info)
            | SimulacError::Batch(info)
            | SimulacError::Serde(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
