//! Seed import system
//!
//! Provides:
//! - Seed Format v1 schema (nested plant hierarchy plus parts)
//! - YAML parser with validation
//! - Digest of the parsed seed
//! - Transactional upsert importer

pub mod digest;
pub mod format_v1;
pub mod importer;
pub mod parser;

pub use digest::compute_seed_digest;
pub use format_v1::SeedV1;
pub use importer::{import_seed, import_seed_str, ImportReport};
pub use parser::{parse_seed_file, parse_seed_str};
