//! Production logging and per-cell production history

use super::boundary::{guarded, Messages};
use super::Gateway;
use celltrack_core::errors::Result;
use celltrack_core::model::time::{now_millis, truncate_millis};
use celltrack_core::model::{CellRangeQuery, DailyProduction, ProductionDraft, ProductionLog};
use celltrack_core::Envelope;
use celltrack_core_types::RequestContext;
use celltrack_store::repo::{production as repo, shifts};
use sqlx::SqlitePool;
use uuid::Uuid;

impl Gateway {
    /// Append a production entry, attributed to the caller's active shift
    /// when there is one
    pub async fn record_production(
        &self,
        ctx: &RequestContext,
        draft: ProductionDraft,
    ) -> Envelope<ProductionLog> {
        guarded(
            ctx,
            "record_production",
            Messages::new(
                "Production recorded successfully",
                "Failed to record production",
            ),
            record(&self.pool, ctx.user_id(), draft),
        )
        .await
    }

    /// A cell's entries in the date range, oldest first
    pub async fn get_production_logs(
        &self,
        ctx: &RequestContext,
        query: &CellRangeQuery,
    ) -> Envelope<Vec<ProductionLog>> {
        let range = query.range();
        guarded(
            ctx,
            "get_production_logs",
            Messages::new(
                "Production logs fetched successfully",
                "Failed to fetch production logs",
            ),
            repo::in_range(&self.pool, &query.cell_id, &range),
        )
        .await
    }

    /// Per-day totals for a cell in the date range
    pub async fn get_daily_production(
        &self,
        ctx: &RequestContext,
        query: &CellRangeQuery,
    ) -> Envelope<Vec<DailyProduction>> {
        let range = query.range();
        guarded(
            ctx,
            "get_daily_production",
            Messages::new(
                "Daily production fetched successfully",
                "Failed to fetch daily production",
            ),
            repo::daily_totals(&self.pool, &query.cell_id, &range),
        )
        .await
    }
}

async fn record(pool: &SqlitePool, user_id: &str, draft: ProductionDraft) -> Result<ProductionLog> {
    let shift = shifts::active_shift(pool, user_id).await?;

    let log = ProductionLog {
        id: Uuid::now_v7().to_string(),
        cell_id: draft.cell_id,
        part_id: draft.part_id,
        shift_id: shift.map(|s| s.id),
        recorded_at: draft
            .recorded_at
            .map(truncate_millis)
            .unwrap_or_else(now_millis),
        quantity: draft.quantity,
    };

    repo::insert(pool, &log).await?;
    Ok(log)
}
