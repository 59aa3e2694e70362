//! Generic CRUD over the plant hierarchy
//!
//! One implementation serves Company, Site, ValueStream, Cell, Machine and
//! Part through the `Record` trait. Lists are ordered by `name`, then `id`.

use crate::db::WriteTx;
use crate::errors::{from_sqlx, Result};
use crate::repo::record::{ChildRecord, Record};
use celltrack_core::errors::{ExError, TrackerError};
use celltrack_core::model::time::now_millis;
use sqlx::sqlite::SqliteRow;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

fn select_sql<R: Record>() -> String {
    format!(
        "SELECT id, {} FROM {}",
        R::COLUMNS.join(", "),
        R::KIND.table()
    )
}

fn insert_sql<R: Record>() -> String {
    let placeholders = vec!["?"; R::COLUMNS.len() + 1].join(", ");
    format!(
        "INSERT INTO {} (id, {}) VALUES ({})",
        R::KIND.table(),
        R::COLUMNS.join(", "),
        placeholders
    )
}

fn update_sql<R: Record>() -> String {
    let assignments: Vec<String> = R::COLUMNS.iter().map(|c| format!("{} = ?", c)).collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?",
        R::KIND.table(),
        assignments.join(", ")
    )
}

/// Insert, or overwrite every column except `created_at` on id collision
fn upsert_sql<R: Record>() -> String {
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .filter(|c| **c != "created_at")
        .map(|c| format!("{} = excluded.{}", c, c))
        .collect();
    format!(
        "{} ON CONFLICT(id) DO UPDATE SET {}",
        insert_sql::<R>(),
        assignments.join(", ")
    )
}

fn decode_all<R: Record>(rows: &[SqliteRow]) -> Result<Vec<R>> {
    rows.iter()
        .map(R::from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_sqlx(e).with_entity(R::KIND))
}

fn not_found<R: Record>(id: &str) -> ExError {
    TrackerError::EntityNotFound {
        entity: R::KIND,
        id: id.to_string(),
    }
    .into()
}

/// All rows of `R`
pub async fn list<R: Record>(pool: &SqlitePool) -> Result<Vec<R>> {
    let sql = format!("{} ORDER BY name, id", select_sql::<R>());
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND))?;
    decode_all(&rows)
}

/// Rows of `R` whose parent is `parent_id`; empty when there are none
pub async fn list_by_parent<R: ChildRecord>(pool: &SqlitePool, parent_id: &str) -> Result<Vec<R>> {
    let sql = format!(
        "{} WHERE {} = ? ORDER BY name, id",
        select_sql::<R>(),
        R::PARENT_COLUMN
    );
    let rows = sqlx::query(&sql)
        .bind(parent_id)
        .fetch_all(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND))?;
    decode_all(&rows)
}

/// Fetch one row, failing with NotFound when absent
pub async fn get<R: Record>(pool: &SqlitePool, id: &str) -> Result<R> {
    let sql = format!("{} WHERE id = ?", select_sql::<R>());
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND).with_entity_id(id))?;

    match row {
        Some(row) => R::from_row(&row).map_err(|e| from_sqlx(e).with_entity(R::KIND)),
        None => Err(not_found::<R>(id)),
    }
}

/// Insert a new row under a fresh UUIDv7 id
///
/// Store constraints are the only validation: a dangling parent reference
/// fails with ConstraintViolation.
pub async fn create<R: Record>(pool: &SqlitePool, draft: R::Draft) -> Result<R> {
    let record = R::from_draft(Uuid::now_v7().to_string(), draft, now_millis());

    let sql = insert_sql::<R>();
    record
        .bind_columns(sqlx::query(&sql).bind(record.id().to_string()))?
        .execute(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND))?;

    Ok(record)
}

/// Apply a patch and bump `updated_at`
///
/// The row is read and rewritten under the write lock, so concurrent
/// updates of one row apply one after the other.
pub async fn update<R: Record>(pool: &SqlitePool, id: &str, patch: R::Patch) -> Result<R> {
    let mut tx = WriteTx::begin(pool).await?;
    let outcome = match tx.conn() {
        Ok(conn) => update_locked::<R>(conn, id, patch).await,
        Err(err) => Err(err),
    };
    tx.finish(outcome).await
}

async fn update_locked<R: Record>(
    conn: &mut SqliteConnection,
    id: &str,
    patch: R::Patch,
) -> Result<R> {
    let sql = format!("{} WHERE id = ?", select_sql::<R>());
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND).with_entity_id(id))?;
    let mut record = match row {
        Some(row) => R::from_row(&row).map_err(|e| from_sqlx(e).with_entity(R::KIND))?,
        None => return Err(not_found::<R>(id)),
    };

    record.apply(patch, now_millis());

    let sql = update_sql::<R>();
    record
        .bind_columns(sqlx::query(&sql))?
        .bind(id.to_string())
        .execute(&mut *conn)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND).with_entity_id(id))?;

    Ok(record)
}

/// Delete one row
///
/// Fails with NotFound when absent and ConstraintViolation while children
/// still reference it.
pub async fn delete<R: Record>(pool: &SqlitePool, id: &str) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?", R::KIND.table());
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND).with_entity_id(id))?;

    if result.rows_affected() == 0 {
        return Err(not_found::<R>(id));
    }
    Ok(())
}

/// Insert or refresh a row with a caller-chosen id, inside a transaction
pub async fn upsert_tx<R: Record>(tx: &mut Transaction<'_, Sqlite>, record: &R) -> Result<()> {
    let sql = upsert_sql::<R>();
    record
        .bind_columns(sqlx::query(&sql).bind(record.id().to_string()))?
        .execute(&mut **tx)
        .await
        .map_err(|e| from_sqlx(e).with_entity(R::KIND).with_entity_id(record.id()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use celltrack_core::model::{Cell, Company, Part};

    #[test]
    fn test_select_lists_every_column() {
        assert_eq!(
            select_sql::<Cell>(),
            "SELECT id, name, description, value_stream_id, created_at, updated_at FROM cells"
        );
    }

    #[test]
    fn test_insert_placeholders_match_columns() {
        assert_eq!(
            insert_sql::<Company>(),
            "INSERT INTO companies (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_upsert_keeps_created_at() {
        let sql = upsert_sql::<Part>();
        assert!(sql.contains("attributes = excluded.attributes"));
        assert!(!sql.contains("created_at = excluded.created_at"));
    }

    #[test]
    fn test_update_binds_id_last() {
        assert!(update_sql::<Company>().ends_with("WHERE id = ?"));
    }
}
