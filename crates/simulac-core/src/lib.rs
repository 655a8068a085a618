#![deny(missing_docs)]
#![doc = "Core error type, ensemble model and fate labels shared by the simulac analysis crates."]

pub mod ensemble;
pub mod errors;
mod fate;
/// Canonical JSON helpers.
pub mod serde;

pub use ensemble::Ensemble;
pub use errors::{ErrorInfo, SimulacError};
pub use fate::Fate;
pub use crate::serde::{from_json_slice, to_canonical_json_bytes};
