//! Lambda-specific view of a set configuration.

use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};
use simulac_data::{RunMetadata, SetConfig};
use tracing::warn;

/// MOI assumed when it cannot be derived from the operator layout.
pub const DEFAULT_MOI: usize = 8;

/// How the multiplicity of infection was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoiRule {
    /// `LambdaQs` sets: PRPRM operator block minus PL operator block.
    SplitPromoter,
    /// `LambdaQ` sets carry the PAQ promoter; the default is assumed.
    PaqDefault,
    /// `Lambda` sets: PRE operator block minus PL operator block.
    PreBlock,
    /// Unrecognised set name; the default is assumed.
    Fallback,
}

impl MoiRule {
    /// Picks the rule from the set name.
    pub fn for_set_name(name: &str) -> Self {
        if name.contains("LambdaQs") {
            MoiRule::SplitPromoter
        } else if name.contains("LambdaQ") {
            MoiRule::PaqDefault
        } else if name.contains("Lambda") {
            MoiRule::PreBlock
        } else {
            MoiRule::Fallback
        }
    }
}

/// Species columns and set labels needed by the phage analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhageConfig {
    /// Underlying set configuration.
    pub set: SetConfig,
    /// Labels parsed from the set path.
    pub metadata: RunMetadata,
    /// `CICI` dimer column.
    pub ci2: usize,
    /// `CroCro` dimer column.
    pub cro2: usize,
    /// `CII` column.
    pub cii: usize,
    /// `CIII` column.
    pub ciii: usize,
    /// `N` column.
    pub n: usize,
    /// `Q` column, when the model has one.
    pub q: Option<usize>,
    /// `Qa` column, when the model has one.
    pub qa: Option<usize>,
    /// Phage copies per cell.
    pub moi: usize,
    /// Rule that produced `moi`.
    pub moi_rule: MoiRule,
}

impl PhageConfig {
    /// Resolves the lambda species and the MOI for a set.
    pub fn from_set(set: &SetConfig) -> Result<Self, SimulacError> {
        let metadata = set.metadata();
        let moi_rule = MoiRule::for_set_name(&metadata.set_name);
        let moi = match moi_rule {
            MoiRule::SplitPromoter => operator_span(set, "OperatorPRPRM_0", "OperatorPL_0")?,
            MoiRule::PreBlock => operator_span(set, "OperatorPRE_0", "OperatorPL_0")?,
            MoiRule::PaqDefault => {
                warn!(set = %metadata.set_name, moi = DEFAULT_MOI, "MOI computation not implemented; assuming default");
                DEFAULT_MOI
            }
            MoiRule::Fallback => {
                warn!(set = %metadata.set_name, moi = DEFAULT_MOI, "can't determine MOI; assuming default");
                DEFAULT_MOI
            }
        };
        Ok(Self {
            ci2: set.require_species("CICI")?,
            cro2: set.require_species("CroCro")?,
            cii: set.require_species("CII")?,
            ciii: set.require_species("CIII")?,
            n: set.require_species("N")?,
            q: set.species_index("Q"),
            qa: set.species_index("Qa"),
            set: set.clone(),
            metadata,
            moi,
            moi_rule,
        })
    }

    /// Column holding simulation time.
    pub fn time_index(&self) -> usize {
        self.set.time_index
    }

    /// Column holding the cell volume.
    pub fn volume_index(&self) -> usize {
        self.set.volume_index
    }

    /// The Q-like antiterminator column, preferring `Qa` over `Q`.
    pub fn q_like(&self) -> Option<(&'static str, usize)> {
        self.qa
            .map(|col| ("Qa", col))
            .or_else(|| self.q.map(|col| ("Q", col)))
    }
}

fn operator_span(set: &SetConfig, upper: &str, lower: &str) -> Result<usize, SimulacError> {
    let lookup = |name: &str| {
        set.operator_index(name).ok_or_else(|| {
            SimulacError::Config(
                ErrorInfo::new("missing_key", format!("operator_{name}_index is required to derive the MOI"))
                    .with_context("key", format!("operator_{name}_index")),
            )
        })
    };
    let (hi, lo) = (lookup(upper)?, lookup(lower)?);
    hi.checked_sub(lo).filter(|moi| *moi > 0).ok_or_else(|| {
        SimulacError::Config(
            ErrorInfo::new("invalid_moi", "operator layout yields a non-positive MOI")
                .with_context("upper", hi.to_string())
                .with_context("lower", lo.to_string()),
        )
    })
}
