//! Schema migrations compiled into the binary

use sha2::{Digest, Sha256};

/// One ordered schema change
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

impl Migration {
    /// Hex SHA-256 of the SQL text, recorded when applied
    pub fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.sql.as_bytes()))
    }
}

const MIGRATIONS: &[Migration] = &[Migration {
    id: "001_initial_schema",
    sql: include_str!("../../migrations/001_initial_schema.sql"),
}];

/// Every migration, in application order
pub fn get_migrations() -> &'static [Migration] {
    MIGRATIONS
}
