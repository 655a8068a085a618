//! Column lists for the per-copy operator and promoter variables.
//!
//! Each phage copy contributes one column per family; copies are laid out
//! at a fixed stride starting from the `_0` (operators) or bare (promoters)
//! index.

use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};
use simulac_data::SetConfig;

/// Operator-state families (`operator_Operator<F>_<k>_index`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorFamily {
    /// PRE operator states.
    Pre,
    /// Combined PR/PRM operator states.
    PrPrm,
}

/// RNAP launch-count families (`promoter_<F>_index`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoterFamily {
    /// PRE promoter.
    Pre,
    /// PR promoter.
    Pr,
    /// PL promoter.
    Pl,
    /// PRM promoter.
    Prm,
}

impl OperatorFamily {
    /// Name used in setup keys.
    pub fn name(self) -> &'static str {
        match self {
            OperatorFamily::Pre => "PRE",
            OperatorFamily::PrPrm => "PRPRM",
        }
    }

    /// One column per phage copy.
    pub fn columns(self, set: &SetConfig, moi: usize) -> Result<Vec<usize>, SimulacError> {
        let base_name = format!("Operator{}_0", self.name());
        let next_name = format!("Operator{}_1", self.name());
        let base = set
            .operator_index(&base_name)
            .ok_or_else(|| missing("operator", &base_name))?;
        strided(base, set.operator_index(&next_name), moi, "operator", &next_name)
    }
}

impl PromoterFamily {
    /// Name used in setup keys.
    pub fn name(self) -> &'static str {
        match self {
            PromoterFamily::Pre => "PRE",
            PromoterFamily::Pr => "PR",
            PromoterFamily::Pl => "PL",
            PromoterFamily::Prm => "PRM",
        }
    }

    /// One RNAP-count column per phage copy.
    pub fn columns(self, set: &SetConfig, moi: usize) -> Result<Vec<usize>, SimulacError> {
        let base_name = self.name().to_string();
        let next_name = format!("{}_1", self.name());
        let base = set
            .promoter_index(&base_name)
            .ok_or_else(|| missing("promoter", &base_name))?;
        strided(base, set.promoter_index(&next_name), moi, "promoter", &next_name)
    }
}

fn missing(prefix: &str, name: &str) -> SimulacError {
    let key = format!("{prefix}_{name}_index");
    SimulacError::Config(
        ErrorInfo::new("missing_key", format!("required setup key '{key}' is absent"))
            .with_context("key", key),
    )
}

fn strided(
    base: usize,
    next: Option<usize>,
    moi: usize,
    prefix: &str,
    next_name: &str,
) -> Result<Vec<usize>, SimulacError> {
    let stride = match next {
        None => 1,
        Some(next) if next > base => next - base,
        Some(next) => {
            return Err(SimulacError::Config(
                ErrorInfo::new("invalid_stride", "second copy must follow the first")
                    .with_context("key", format!("{prefix}_{next_name}_index"))
                    .with_context("base", base.to_string())
                    .with_context("next", next.to_string()),
            ));
        }
    };
    Ok((0..moi).map(|copy| base + copy * stride).collect())
}
