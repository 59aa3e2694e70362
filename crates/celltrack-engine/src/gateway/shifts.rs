//! Shift operations, scoped to the calling user

use super::boundary::{guarded, Messages};
use super::Gateway;
use celltrack_core::errors::{ExError, TrackerError};
use celltrack_core::model::{EntityKind, Shift};
use celltrack_core::Envelope;
use celltrack_core_types::RequestContext;
use celltrack_store::repo::shifts as repo;

impl Gateway {
    /// Open a shift for the caller, subject to the configured policy
    pub async fn start_shift(
        &self,
        ctx: &RequestContext,
        cell_id: Option<String>,
    ) -> Envelope<Shift> {
        guarded(
            ctx,
            "start_shift",
            Messages::new("Shift started successfully", "Failed to start shift"),
            repo::start_shift(
                &self.pool,
                self.shift_policy.as_ref(),
                ctx.user_id(),
                cell_id,
            ),
        )
        .await
    }

    /// Close one of the caller's shifts
    pub async fn end_shift(&self, ctx: &RequestContext, shift_id: &str) -> Envelope<Shift> {
        guarded(
            ctx,
            "end_shift",
            Messages::new("Shift ended successfully", "Failed to end shift"),
            repo::end_shift(&self.pool, shift_id, ctx.user_id()),
        )
        .await
    }

    /// The caller's most recently started active shift
    pub async fn get_active_shift(&self, ctx: &RequestContext) -> Envelope<Shift> {
        let work = async {
            let shift = repo::active_shift(&self.pool, ctx.user_id()).await?;
            shift.ok_or_else(|| {
                ExError::from(TrackerError::EntityNotFound {
                    entity: EntityKind::Shift,
                    id: ctx.user_id().to_string(),
                })
            })
        };
        guarded(
            ctx,
            "get_active_shift",
            Messages::new("Active shift fetched successfully", "Failed to fetch shift"),
            work,
        )
        .await
    }

    /// The caller's shifts, newest first
    pub async fn list_shifts(&self, ctx: &RequestContext) -> Envelope<Vec<Shift>> {
        guarded(
            ctx,
            "list_shifts",
            Messages::new("Shifts fetched successfully", "Failed to fetch shifts"),
            repo::list_for_user(&self.pool, ctx.user_id()),
        )
        .await
    }
}
