use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};

use crate::expr::SetupValue;
use crate::meta::RunMetadata;

const SPECIES_PREFIX: &str = "species_";
const OPERATOR_PREFIX: &str = "operator_";
const PROMOTER_PREFIX: &str = "promoter_";
const INDEX_SUFFIX: &str = "_index";

/// Typed view of a set's setup file. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetConfig {
    /// Directory holding the set.
    pub path: PathBuf,
    /// Setup file name relative to `path`.
    pub setup_file: String,
    /// Column holding simulation time (seconds).
    pub time_index: usize,
    /// Column holding the relative cell volume.
    pub volume_index: usize,
    /// Simulator configuration file recorded in the setup, if any.
    pub config_file: Option<String>,
    /// Initial cell size (`cell_size_initial`).
    pub cell_size_initial: Option<f64>,
    /// Reference cell size (`cell_size_reference`).
    pub cell_size_reference: Option<f64>,
    /// Cell growth rate (`cell_growth_rate`).
    pub cell_growth_rate: Option<f64>,
    /// `species_<NAME>_index` columns keyed by `NAME`.
    pub species: BTreeMap<String, usize>,
    /// `operator_<NAME>_index` columns keyed by `NAME`.
    pub operators: BTreeMap<String, usize>,
    /// `promoter_<NAME>_index` columns keyed by `NAME`.
    pub promoters: BTreeMap<String, usize>,
    /// Every remaining binding.
    pub parameters: BTreeMap<String, SetupValue>,
}

fn missing_key(path: &Path, key: &str) -> SimulacError {
    SimulacError::Config(
        ErrorInfo::new("missing_key", format!("required setup key '{key}' is absent"))
            .with_context("key", key)
            .with_path(path),
    )
}

fn invalid_value(key: &str, expected: &str, value: &SetupValue) -> SimulacError {
    SimulacError::Config(
        ErrorInfo::new("invalid_value", format!("setup key '{key}' must be {expected}"))
            .with_context("key", key)
            .with_context("value", value.to_string()),
    )
}

fn family_name<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .strip_suffix(INDEX_SUFFIX)
        .filter(|name| !name.is_empty())
}

impl SetConfig {
    /// Validates required keys and sorts bindings into typed fields.
    pub fn from_entries(
        path: impl Into<PathBuf>,
        setup_file: impl Into<String>,
        entries: &BTreeMap<String, SetupValue>,
    ) -> Result<Self, SimulacError> {
        let path = path.into();
        let index = |key: &str| -> Result<usize, SimulacError> {
            let value = entries.get(key).ok_or_else(|| missing_key(&path, key))?;
            value
                .as_index()
                .ok_or_else(|| invalid_value(key, "a non-negative integer", value))
        };
        let time_index = index("time_index")?;
        let volume_index = index("volume_index")?;

        let mut config = Self {
            path: path.clone(),
            setup_file: setup_file.into(),
            time_index,
            volume_index,
            config_file: None,
            cell_size_initial: None,
            cell_size_reference: None,
            cell_growth_rate: None,
            species: BTreeMap::new(),
            operators: BTreeMap::new(),
            promoters: BTreeMap::new(),
            parameters: BTreeMap::new(),
        };

        for (key, value) in entries {
            let family = [
                (SPECIES_PREFIX, &mut config.species),
                (OPERATOR_PREFIX, &mut config.operators),
                (PROMOTER_PREFIX, &mut config.promoters),
            ]
            .into_iter()
            .find_map(|(prefix, map)| family_name(key, prefix).map(|name| (name, map)));
            if let Some((name, map)) = family {
                let column = value
                    .as_index()
                    .ok_or_else(|| invalid_value(key, "a non-negative integer", value))?;
                map.insert(name.to_string(), column);
                continue;
            }
            match key.as_str() {
                "time_index" | "volume_index" => {}
                "config_file" => {
                    let text = value
                        .as_str()
                        .ok_or_else(|| invalid_value(key, "a string", value))?;
                    config.config_file = Some(text.to_string());
                }
                "cell_size_initial" | "cell_size_reference" | "cell_growth_rate" => {
                    let number = value
                        .as_f64()
                        .ok_or_else(|| invalid_value(key, "numeric", value))?;
                    match key.as_str() {
                        "cell_size_initial" => config.cell_size_initial = Some(number),
                        "cell_size_reference" => config.cell_size_reference = Some(number),
                        _ => config.cell_growth_rate = Some(number),
                    }
                }
                _ => {
                    config.parameters.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(config)
    }

    /// Column of `species_<name>_index`, if defined.
    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.species.get(name).copied()
    }

    /// Column of `operator_<name>_index`, if defined.
    pub fn operator_index(&self, name: &str) -> Option<usize> {
        self.operators.get(name).copied()
    }

    /// Column of `promoter_<name>_index`, if defined.
    pub fn promoter_index(&self, name: &str) -> Option<usize> {
        self.promoters.get(name).copied()
    }

    /// Resolves a species name or reports `variable_not_found`.
    pub fn require_species(&self, name: &str) -> Result<usize, SimulacError> {
        self.species_index(name).ok_or_else(|| {
            SimulacError::Lookup(
                ErrorInfo::new("variable_not_found", format!("could not find variable '{name}'"))
                    .with_context("variable", name)
                    .with_hint(format!("define {SPECIES_PREFIX}{name}{INDEX_SUFFIX} in the setup file")),
            )
        })
    }

    /// Labels derived from the set path.
    pub fn metadata(&self) -> RunMetadata {
        RunMetadata::from_path(&self.path)
    }
}
