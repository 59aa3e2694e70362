//! Downtime log persistence

use crate::errors::{from_sqlx, Result};
use celltrack_core::model::time::from_millis;
use celltrack_core::model::{DateRange, DowntimeLog, EntityKind};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_DOWNTIME: &str =
    "SELECT id, run_id, reason, start_time, duration_minutes FROM downtime_logs";

fn downtime_from_row(row: &SqliteRow) -> std::result::Result<DowntimeLog, sqlx::Error> {
    Ok(DowntimeLog {
        id: row.try_get("id")?,
        run_id: row.try_get("run_id")?,
        reason: row.try_get("reason")?,
        start_time: from_millis(row.try_get("start_time")?),
        duration_minutes: row.try_get("duration_minutes")?,
    })
}

fn decode(rows: &[SqliteRow]) -> Result<Vec<DowntimeLog>> {
    rows.iter()
        .map(downtime_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::DowntimeLog))
}

/// Append one downtime event exactly as given
pub async fn insert(pool: &SqlitePool, log: &DowntimeLog) -> Result<()> {
    sqlx::query(
        "INSERT INTO downtime_logs (id, run_id, reason, start_time, duration_minutes)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&log.id)
    .bind(&log.run_id)
    .bind(&log.reason)
    .bind(log.start_time.timestamp_millis())
    .bind(log.duration_minutes)
    .execute(pool)
    .await
    .map_err(|e| {
        from_sqlx(e)
            .with_entity(EntityKind::DowntimeLog)
            .with_entity_id(log.id.clone())
    })?;
    Ok(())
}

/// Events for one production run, in start order
pub async fn for_run(pool: &SqlitePool, run_id: &str) -> Result<Vec<DowntimeLog>> {
    let sql = format!(
        "{} WHERE run_id = ? ORDER BY start_time, id",
        SELECT_DOWNTIME
    );
    let rows = sqlx::query(&sql)
        .bind(run_id)
        .fetch_all(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::DowntimeLog))?;
    decode(&rows)
}

/// Events starting within `range`, in start order
pub async fn in_range(pool: &SqlitePool, range: &DateRange) -> Result<Vec<DowntimeLog>> {
    let sql = format!(
        "{} WHERE start_time >= ? AND start_time < ? ORDER BY start_time, id",
        SELECT_DOWNTIME
    );
    let rows = sqlx::query(&sql)
        .bind(range.start_millis())
        .bind(range.end_exclusive_millis())
        .fetch_all(pool)
        .await
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::DowntimeLog))?;
    decode(&rows)
}
