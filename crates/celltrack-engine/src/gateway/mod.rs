//! The query gateway
//!
//! `Gateway` owns the pool and the shift policy. It is cheap to clone; every
//! clone shares the same pool. Operations live in the submodules, grouped by
//! concern.

mod boundary;

pub mod analytics;
pub mod downtime;
pub mod hierarchy;
pub mod production;
pub mod shifts;

use crate::config::AppConfig;
use celltrack_core::errors::ExError;
use celltrack_core::policy::{ShiftPolicy, SingleActiveShiftPolicy, UnrestrictedShiftPolicy};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Gateway {
    pool: SqlitePool,
    shift_policy: Arc<dyn ShiftPolicy>,
}

impl Gateway {
    /// Gateway over an existing pool, with no shift restriction
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            shift_policy: Arc::new(UnrestrictedShiftPolicy),
        }
    }

    pub fn with_shift_policy(mut self, policy: Arc<dyn ShiftPolicy>) -> Self {
        self.shift_policy = policy;
        self
    }

    /// Build the pool described by `config` and apply pending migrations
    pub async fn connect(config: &AppConfig) -> Result<Self, ExError> {
        let pool = celltrack_store::connect(&config.pool_settings()).await?;
        celltrack_store::migrations::apply_migrations(&pool).await?;

        let gateway = Self::new(pool);
        Ok(if config.shifts.enforce_single_active {
            gateway.with_shift_policy(Arc::new(SingleActiveShiftPolicy))
        } else {
            gateway
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}
