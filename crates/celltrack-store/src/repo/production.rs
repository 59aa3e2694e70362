//! Production log persistence and daily aggregation

use crate::errors::{from_sqlx, Result};
use celltrack_core::model::time::from_millis;
use celltrack_core::model::{DailyProduction, DateRange, EntityKind, ProductionLog};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn production_from_row(row: &SqliteRow) -> std::result::Result<ProductionLog, sqlx::Error> {
    Ok(ProductionLog {
        id: row.try_get("id")?,
        cell_id: row.try_get("cell_id")?,
        part_id: row.try_get("part_id")?,
        shift_id: row.try_get("shift_id")?,
        recorded_at: from_millis(row.try_get("recorded_at")?),
        quantity: row.try_get("quantity")?,
    })
}

/// Append one production entry
pub async fn insert(pool: &SqlitePool, log: &ProductionLog) -> Result<()> {
    sqlx::query(
        "INSERT INTO production_logs (id, cell_id, part_id, shift_id, recorded_at, quantity)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&log.id)
    .bind(&log.cell_id)
    .bind(&log.part_id)
    .bind(&log.shift_id)
    .bind(log.recorded_at.timestamp_millis())
    .bind(log.quantity)
    .execute(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::ProductionLog))?;
    Ok(())
}

/// A cell's entries recorded within `range`, oldest first
pub async fn in_range(
    pool: &SqlitePool,
    cell_id: &str,
    range: &DateRange,
) -> Result<Vec<ProductionLog>> {
    let rows = sqlx::query(
        "SELECT id, cell_id, part_id, shift_id, recorded_at, quantity
         FROM production_logs
         WHERE cell_id = ? AND recorded_at >= ? AND recorded_at < ?
         ORDER BY recorded_at, id",
    )
    .bind(cell_id)
    .bind(range.start_millis())
    .bind(range.end_exclusive_millis())
    .fetch_all(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::ProductionLog))?;

    rows.iter()
        .map(production_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::ProductionLog))
}

/// Per-UTC-day totals for a cell within `range`, ascending by day
pub async fn daily_totals(
    pool: &SqlitePool,
    cell_id: &str,
    range: &DateRange,
) -> Result<Vec<DailyProduction>> {
    let rows = sqlx::query(
        "SELECT date(recorded_at / 1000, 'unixepoch') AS day,
                SUM(quantity) AS total_quantity,
                COUNT(*) AS entries
         FROM production_logs
         WHERE cell_id = ? AND recorded_at >= ? AND recorded_at < ?
         GROUP BY day
         ORDER BY day",
    )
    .bind(cell_id)
    .bind(range.start_millis())
    .bind(range.end_exclusive_millis())
    .fetch_all(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::ProductionLog))?;

    rows.iter()
        .map(|row| {
            Ok(DailyProduction {
                date: row.try_get("day")?,
                total_quantity: row.try_get("total_quantity")?,
                entries: row.try_get("entries")?,
            })
        })
        .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::ProductionLog))
}
