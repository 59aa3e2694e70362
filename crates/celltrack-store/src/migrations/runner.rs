//! Migration runner
//!
//! Applies migrations in order, each inside its own transaction, and records
//! them in `schema_version`. Re-running is a no-op unless an applied
//! migration's SQL changed, which is reported as a checksum mismatch.

use crate::errors::{from_sqlx, migration_drift, migration_failed, Result};
use crate::migrations::embedded::{get_migrations, Migration};
use sqlx::{Executor, SqlitePool};

/// Apply all pending migrations to the database
pub async fn apply_migrations(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;

    for migration in get_migrations() {
        apply_migration(pool, migration).await?;
    }

    Ok(())
}

/// Ids of applied migrations, in application order
pub async fn applied_migrations(pool: &SqlitePool) -> Result<Vec<String>> {
    sqlx::query_scalar("SELECT migration_id FROM schema_version ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(from_sqlx)
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(from_sqlx)?;

    Ok(())
}

async fn apply_migration(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    let checksum = migration.checksum();

    let recorded: Option<String> =
        sqlx::query_scalar("SELECT checksum FROM schema_version WHERE migration_id = ?")
            .bind(migration.id)
            .fetch_optional(pool)
            .await
            .map_err(from_sqlx)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(migration_drift(migration.id, &recorded, &checksum));
        }
        return Ok(());
    }

    let mut tx = pool.begin().await.map_err(from_sqlx)?;

    (&mut *tx)
        .execute(migration.sql)
        .await
        .map_err(|e| migration_failed(migration.id, e))?;

    sqlx::query("INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)")
        .bind(migration.id)
        .bind(chrono::Utc::now().timestamp_millis())
        .bind(&checksum)
        .execute(&mut *tx)
        .await
        .map_err(from_sqlx)?;

    tx.commit().await.map_err(from_sqlx)?;

    tracing::info!(migration_id = migration.id, "Applied migration");

    Ok(())
}
