//! Shift persistence
//!
//! Starting and ending a shift each read and write under the write lock, so
//! the policy check and the insert see the same state even with concurrent
//! callers.

use crate::db::WriteTx;
use crate::errors::{from_sqlx, Result};
use celltrack_core::errors::TrackerError;
use celltrack_core::model::time::{from_millis, now_millis};
use celltrack_core::model::{EntityKind, Shift};
use celltrack_core::policy::ShiftPolicy;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

const SELECT_SHIFT: &str = "SELECT id, user_id, cell_id, started_at, ended_at, active FROM shifts";

fn shift_from_row(row: &SqliteRow) -> std::result::Result<Shift, sqlx::Error> {
    let ended_at: Option<i64> = row.try_get("ended_at")?;
    Ok(Shift {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        cell_id: row.try_get("cell_id")?,
        started_at: from_millis(row.try_get("started_at")?),
        ended_at: ended_at.map(from_millis),
        active: row.try_get("active")?,
    })
}

fn decode_shifts(rows: &[SqliteRow]) -> Result<Vec<Shift>> {
    rows.iter()
        .map(shift_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::Shift))
}

async fn active_for_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Shift>> {
    let sql = format!(
        "{} WHERE user_id = ? AND active = 1 ORDER BY started_at DESC, id DESC",
        SELECT_SHIFT
    );
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .fetch_all(conn)
        .await
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::Shift))?;
    decode_shifts(&rows)
}

/// Open a shift for `user_id` if `policy` admits it
pub async fn start_shift(
    pool: &SqlitePool,
    policy: &dyn ShiftPolicy,
    user_id: &str,
    cell_id: Option<String>,
) -> Result<Shift> {
    let mut tx = WriteTx::begin(pool).await?;
    let outcome = match tx.conn() {
        Ok(conn) => start_locked(conn, policy, user_id, cell_id).await,
        Err(err) => Err(err),
    };
    tx.finish(outcome).await
}

async fn start_locked(
    conn: &mut SqliteConnection,
    policy: &dyn ShiftPolicy,
    user_id: &str,
    cell_id: Option<String>,
) -> Result<Shift> {
    let active = active_for_user(&mut *conn, user_id).await?;
    policy.admit_start(user_id, &active)?;

    let shift = Shift::start(
        Uuid::now_v7().to_string(),
        user_id.to_string(),
        cell_id,
        now_millis(),
    );

    sqlx::query(
        "INSERT INTO shifts (id, user_id, cell_id, started_at, ended_at, active)
         VALUES (?, ?, ?, ?, NULL, 1)",
    )
    .bind(&shift.id)
    .bind(&shift.user_id)
    .bind(&shift.cell_id)
    .bind(shift.started_at.timestamp_millis())
    .execute(&mut *conn)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::Shift))?;

    Ok(shift)
}

/// Close a shift owned by `user_id`
pub async fn end_shift(pool: &SqlitePool, shift_id: &str, user_id: &str) -> Result<Shift> {
    let mut tx = WriteTx::begin(pool).await?;
    let outcome = match tx.conn() {
        Ok(conn) => end_locked(conn, shift_id, user_id).await,
        Err(err) => Err(err),
    };
    tx.finish(outcome).await
}

async fn end_locked(conn: &mut SqliteConnection, shift_id: &str, user_id: &str) -> Result<Shift> {
    let sql = format!("{} WHERE id = ?", SELECT_SHIFT);
    let row = sqlx::query(&sql)
        .bind(shift_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::Shift))?;

    let mut shift = match row {
        Some(row) => {
            shift_from_row(&row).map_err(|e| from_sqlx(e).with_entity(EntityKind::Shift))?
        }
        None => {
            return Err(TrackerError::EntityNotFound {
                entity: EntityKind::Shift,
                id: shift_id.to_string(),
            }
            .into())
        }
    };

    if !shift.is_owned_by(user_id) {
        return Err(TrackerError::ShiftNotOwned {
            shift_id: shift_id.to_string(),
            user_id: user_id.to_string(),
        }
        .into());
    }
    if !shift.active {
        return Err(TrackerError::ShiftAlreadyEnded {
            shift_id: shift_id.to_string(),
        }
        .into());
    }

    shift.end(now_millis());

    sqlx::query("UPDATE shifts SET ended_at = ?, active = 0 WHERE id = ?")
        .bind(shift.ended_at.map(|t| t.timestamp_millis()))
        .bind(shift_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::Shift))?;

    Ok(shift)
}

/// The user's most recently started active shift, if any
pub async fn active_shift(pool: &SqlitePool, user_id: &str) -> Result<Option<Shift>> {
    let mut conn = pool.acquire().await.map_err(from_sqlx)?;
    let active = active_for_user(&mut conn, user_id).await?;
    Ok(active.into_iter().next())
}

/// All of the user's shifts, newest first
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Shift>> {
    let sql = format!(
        "{} WHERE user_id = ? ORDER BY started_at DESC, id DESC",
        SELECT_SHIFT
    );
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::Shift))?;
    decode_shifts(&rows)
}
