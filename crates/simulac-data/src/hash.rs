use sha2::{Digest, Sha256};
use simulac_core::Ensemble;

/// Hex SHA-256 over the ensemble shape and its values in row-major order.
pub fn ensemble_digest(ensemble: &Ensemble) -> String {
    let (runs, steps, vars) = ensemble.shape();
    let mut hasher = Sha256::new();
    for dim in [runs, steps, vars] {
        hasher.update((dim as u64).to_le_bytes());
    }
    for value in ensemble.as_array().iter() {
        hasher.update(value.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}
