#![deny(missing_docs)]
#![doc = "Lambda phage specifics: species bindings, promoter columns and lysis/lysogeny decisions."]

pub mod columns;
pub mod compare;
pub mod fate;
pub mod setup;
pub mod threshold;

pub use columns::{OperatorFamily, PromoterFamily};
pub use compare::{compare_fates, FateComparison, MethodOutcome};
pub use fate::{classify, set_fates, FateMethod, FateParams, FatePartition};
pub use setup::{MoiRule, PhageConfig, DEFAULT_MOI};
pub use threshold::{threshold_fate, ThresholdRule};
