//! Repository layer mapping domain models to SQLite tables

pub mod downtime;
pub mod hierarchy;
pub mod metrics;
pub mod production;
pub mod record;
pub mod shifts;

pub use record::{ChildRecord, Record};
