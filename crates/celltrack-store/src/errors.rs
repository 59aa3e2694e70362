//! Store-side constructors for [`ExError`]
//!
//! Every failure that leaves this crate is an `ExError`; the helpers below
//! pin the kind and `op` so the boundary log reads the same for each source.

use celltrack_core::errors::{ExError, ExErrorKind};
use sqlx::error::ErrorKind as DbErrorKind;

pub type Result<T> = std::result::Result<T, ExError>;

/// A migration script was rejected by SQLite
pub fn migration_failed(migration_id: &str, cause: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("apply_migration")
        .with_entity_id(migration_id)
        .with_message(format!("script rejected: {cause}"))
}

/// The stored checksum of an applied migration no longer matches its script
pub fn migration_drift(migration_id: &str, recorded: &str, embedded: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("verify_migration")
        .with_entity_id(migration_id)
        .with_message(format!("recorded {recorded}, embedded {embedded}"))
}

/// The seed document is malformed
pub fn invalid_seed(detail: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("parse_seed")
        .with_message(detail)
}

pub fn seed_unreadable(path: &std::path::Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op("read_seed")
        .with_message(format!("{}: {err}", path.display()))
}

/// Classify a `sqlx::Error`
///
/// Constraint failures (foreign key, unique, not-null, check) are kept apart
/// from connectivity and query failures so callers can tell "bad reference"
/// from "store unavailable".
pub fn from_sqlx(err: sqlx::Error) -> ExError {
    let kind = match &err {
        sqlx::Error::RowNotFound => ExErrorKind::NotFound,
        sqlx::Error::Configuration(_) => ExErrorKind::Configuration,
        sqlx::Error::Io(_) => ExErrorKind::Io,
        sqlx::Error::Database(db_err) => match db_err.kind() {
            DbErrorKind::UniqueViolation
            | DbErrorKind::ForeignKeyViolation
            | DbErrorKind::NotNullViolation
            | DbErrorKind::CheckViolation => ExErrorKind::ConstraintViolation,
            _ => ExErrorKind::Persistence,
        },
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => ExErrorKind::Serialization,
        _ => ExErrorKind::Persistence,
    };

    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(from_sqlx(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_pool_timeout_is_persistence() {
        let err = from_sqlx(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.op(), Some("sqlite"));
    }
}
