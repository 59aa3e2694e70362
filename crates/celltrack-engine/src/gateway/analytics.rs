//! Read-only analytics over the derived per-cell, per-day tables

use super::boundary::{guarded, Messages};
use super::Gateway;
use celltrack_core::model::{
    BottleneckAnalysis, CellRangeQuery, EfficiencyMetric, EfficiencySummary,
};
use celltrack_core::Envelope;
use celltrack_core_types::RequestContext;
use celltrack_store::repo::metrics as repo;

impl Gateway {
    /// Bottleneck rows for one cell in an inclusive date range, oldest first
    ///
    /// An unknown cell is not an error: it yields an empty list.
    pub async fn get_bottleneck_analysis(
        &self,
        ctx: &RequestContext,
        query: &CellRangeQuery,
    ) -> Envelope<Vec<BottleneckAnalysis>> {
        guarded(
            ctx,
            "get_bottleneck_analysis",
            Messages::new(
                "Bottleneck analysis fetched successfully",
                "Failed to fetch bottleneck analysis",
            ),
            repo::bottlenecks_in_range(&self.pool, query),
        )
        .await
    }

    pub async fn get_efficiency_metrics(
        &self,
        ctx: &RequestContext,
        query: &CellRangeQuery,
    ) -> Envelope<Vec<EfficiencyMetric>> {
        guarded(
            ctx,
            "get_efficiency_metrics",
            Messages::new(
                "Efficiency metrics fetched successfully",
                "Failed to fetch efficiency metrics",
            ),
            repo::efficiency_in_range(&self.pool, query),
        )
        .await
    }

    /// Averages over the range; zero samples is still a success
    pub async fn get_efficiency_summary(
        &self,
        ctx: &RequestContext,
        query: &CellRangeQuery,
    ) -> Envelope<EfficiencySummary> {
        guarded(
            ctx,
            "get_efficiency_summary",
            Messages::new(
                "Efficiency summary fetched successfully",
                "Failed to fetch efficiency summary",
            ),
            repo::efficiency_summary(&self.pool, query),
        )
        .await
    }
}
