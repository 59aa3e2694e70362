//! Derived metric rows: efficiency and bottleneck analysis
//!
//! Both tables are filled by an external batch job; `insert_*` exists for
//! that job, seed data and tests. Range filters are inclusive on `date`.

use crate::errors::{from_sqlx, Result};
use celltrack_core::model::{
    BottleneckAnalysis, CellRangeQuery, EfficiencyMetric, EfficiencySummary, EntityKind,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn efficiency_from_row(row: &SqliteRow) -> std::result::Result<EfficiencyMetric, sqlx::Error> {
    Ok(EfficiencyMetric {
        id: row.try_get("id")?,
        cell_id: row.try_get("cell_id")?,
        date: row.try_get("date")?,
        availability: row.try_get("availability")?,
        performance: row.try_get("performance")?,
        quality: row.try_get("quality")?,
        oee: row.try_get("oee")?,
    })
}

fn bottleneck_from_row(row: &SqliteRow) -> std::result::Result<BottleneckAnalysis, sqlx::Error> {
    Ok(BottleneckAnalysis {
        id: row.try_get("id")?,
        cell_id: row.try_get("cell_id")?,
        date: row.try_get("date")?,
        cycle_time_secs: row.try_get("cycle_time_secs")?,
        takt_time_secs: row.try_get("takt_time_secs")?,
        throughput_per_hour: row.try_get("throughput_per_hour")?,
        utilization: row.try_get("utilization")?,
    })
}

pub async fn insert_efficiency(pool: &SqlitePool, metric: &EfficiencyMetric) -> Result<()> {
    sqlx::query(
        "INSERT INTO efficiency_metrics
            (id, cell_id, date, availability, performance, quality, oee)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&metric.id)
    .bind(&metric.cell_id)
    .bind(metric.date)
    .bind(metric.availability)
    .bind(metric.performance)
    .bind(metric.quality)
    .bind(metric.oee)
    .execute(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::EfficiencyMetric))?;
    Ok(())
}

pub async fn insert_bottleneck(pool: &SqlitePool, analysis: &BottleneckAnalysis) -> Result<()> {
    sqlx::query(
        "INSERT INTO bottleneck_analyses
            (id, cell_id, date, cycle_time_secs, takt_time_secs, throughput_per_hour, utilization)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&analysis.id)
    .bind(&analysis.cell_id)
    .bind(analysis.date)
    .bind(analysis.cycle_time_secs)
    .bind(analysis.takt_time_secs)
    .bind(analysis.throughput_per_hour)
    .bind(analysis.utilization)
    .execute(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::BottleneckAnalysis))?;
    Ok(())
}

/// Bottleneck rows for exactly `query.cell_id` within the range, ascending by
/// date (ties by id). An unknown cell simply yields no rows.
pub async fn bottlenecks_in_range(
    pool: &SqlitePool,
    query: &CellRangeQuery,
) -> Result<Vec<BottleneckAnalysis>> {
    let rows = sqlx::query(
        "SELECT id, cell_id, date, cycle_time_secs, takt_time_secs, throughput_per_hour, utilization
         FROM bottleneck_analyses
         WHERE cell_id = ? AND date >= ? AND date <= ?
         ORDER BY date ASC, id ASC",
    )
    .bind(&query.cell_id)
    .bind(query.start_date)
    .bind(query.end_date)
    .fetch_all(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::BottleneckAnalysis))?;

    rows.iter()
        .map(bottleneck_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::BottleneckAnalysis))
}

/// Efficiency rows for a cell within the range, ascending by date
pub async fn efficiency_in_range(
    pool: &SqlitePool,
    query: &CellRangeQuery,
) -> Result<Vec<EfficiencyMetric>> {
    let rows = sqlx::query(
        "SELECT id, cell_id, date, availability, performance, quality, oee
         FROM efficiency_metrics
         WHERE cell_id = ? AND date >= ? AND date <= ?
         ORDER BY date ASC, id ASC",
    )
    .bind(&query.cell_id)
    .bind(query.start_date)
    .bind(query.end_date)
    .fetch_all(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::EfficiencyMetric))?;

    rows.iter()
        .map(efficiency_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_sqlx(e).with_entity(EntityKind::EfficiencyMetric))
}

/// Averages over the matching efficiency rows
///
/// `samples` is 0 and every average `None` when nothing matched.
pub async fn efficiency_summary(
    pool: &SqlitePool,
    query: &CellRangeQuery,
) -> Result<EfficiencySummary> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS samples,
                AVG(availability) AS avg_availability,
                AVG(performance) AS avg_performance,
                AVG(quality) AS avg_quality,
                AVG(oee) AS avg_oee
         FROM efficiency_metrics
         WHERE cell_id = ? AND date >= ? AND date <= ?",
    )
    .bind(&query.cell_id)
    .bind(query.start_date)
    .bind(query.end_date)
    .fetch_one(pool)
    .await
    .map_err(|e| from_sqlx(e).with_entity(EntityKind::EfficiencyMetric))?;

    let decode = |row: &SqliteRow| -> std::result::Result<EfficiencySummary, sqlx::Error> {
        Ok(EfficiencySummary {
            cell_id: query.cell_id.clone(),
            start_date: query.start_date,
            end_date: query.end_date,
            samples: row.try_get("samples")?,
            avg_availability: row.try_get("avg_availability")?,
            avg_performance: row.try_get("avg_performance")?,
            avg_quality: row.try_get("avg_quality")?,
            avg_oee: row.try_get("avg_oee")?,
        })
    };

    decode(&row).map_err(|e| from_sqlx(e).with_entity(EntityKind::EfficiencyMetric))
}
