//! Downtime logging
//!
//! Events are written exactly as supplied. A non-positive duration is kept
//! and only flagged in the log.

use super::boundary::{guarded, Messages};
use super::Gateway;
use celltrack_core::errors::Result;
use celltrack_core::model::logs::next_downtime_id;
use celltrack_core::model::time::now_millis;
use celltrack_core::model::{DateRange, DowntimeDraft, DowntimeLog};
use celltrack_core::Envelope;
use celltrack_core_types::RequestContext;
use celltrack_store::repo::downtime as repo;
use sqlx::SqlitePool;

impl Gateway {
    /// Persist a downtime event under a fresh `dt-<millis>` id and echo it back
    pub async fn log_downtime(
        &self,
        ctx: &RequestContext,
        draft: DowntimeDraft,
    ) -> Envelope<DowntimeLog> {
        if draft.duration_minutes <= 0 {
            tracing::warn!(
                request_id = ctx.request_id.as_str(),
                run_id = %draft.run_id,
                duration_minutes = draft.duration_minutes,
                "Downtime logged with non-positive duration"
            );
        }

        guarded(
            ctx,
            "log_downtime",
            Messages::new("Downtime logged successfully", "Failed to log downtime"),
            record(&self.pool, draft),
        )
        .await
    }

    /// Events for one production run, in start order
    pub async fn get_downtime_for_run(
        &self,
        ctx: &RequestContext,
        run_id: &str,
    ) -> Envelope<Vec<DowntimeLog>> {
        guarded(
            ctx,
            "get_downtime_for_run",
            Messages::new(
                "Downtime logs fetched successfully",
                "Failed to fetch downtime logs",
            ),
            repo::for_run(&self.pool, run_id),
        )
        .await
    }

    /// Events starting within the date range, across all runs
    pub async fn get_downtime_in_range(
        &self,
        ctx: &RequestContext,
        range: &DateRange,
    ) -> Envelope<Vec<DowntimeLog>> {
        guarded(
            ctx,
            "get_downtime_in_range",
            Messages::new(
                "Downtime logs fetched successfully",
                "Failed to fetch downtime logs",
            ),
            repo::in_range(&self.pool, range),
        )
        .await
    }
}

async fn record(pool: &SqlitePool, draft: DowntimeDraft) -> Result<DowntimeLog> {
    let log = DowntimeLog::from_draft(next_downtime_id(now_millis()), draft);
    repo::insert(pool, &log).await?;
    Ok(log)
}
