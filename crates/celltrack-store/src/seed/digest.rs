//! Seed digest
//!
//! SHA256 over the JSON form of the parsed seed. Formatting and comments in
//! the YAML source do not change it.

use crate::errors::Result;
use crate::seed::format_v1::SeedV1;
use celltrack_core::errors::{ExError, ExErrorKind};
use sha2::{Digest, Sha256};

/// Compute a stable digest for a seed
pub fn compute_seed_digest(seed: &SeedV1) -> Result<String> {
    let json = serde_json::to_string(seed).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("seed_digest")
            .with_message(format!("Failed to serialize seed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
