//! Seed parser with validation
//!
//! Parses YAML and validates the schema version, non-empty names and id
//! uniqueness across the whole document.

use crate::errors::{invalid_seed, seed_unreadable, Result};
use crate::seed::format_v1::SeedV1;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV1> {
    let content = fs::read_to_string(path).map_err(|e| seed_unreadable(path, e))?;
    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV1> {
    let seed: SeedV1 = serde_yaml::from_str(content)
        .map_err(|e| invalid_seed(format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV1) -> Result<()> {
    if seed.schema_version != SUPPORTED_SCHEMA_VERSION {
        return Err(invalid_seed(format!(
            "Unsupported schema_version: {}. Expected {}",
            seed.schema_version, SUPPORTED_SCHEMA_VERSION
        )));
    }

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (kind, id, name) in seed.entries() {
        if id.trim().is_empty() {
            return Err(invalid_seed(format!("Empty id on a {}", kind)));
        }
        if name.trim().is_empty() {
            return Err(invalid_seed(format!("Empty name on {} {}", kind, id)));
        }
        if let Some(first) = seen.insert(id, kind) {
            return Err(invalid_seed(format!(
                "Duplicate id {} (used by a {} and a {})",
                id, first, kind
            )));
        }
    }

    Ok(())
}
