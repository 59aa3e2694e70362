//! CellTrack Core - domain model and shared facilities
//!
//! This crate provides the pieces every other layer agrees on:
//! - The plant hierarchy (Company → Site → Value Stream → Cell → Machine) and Parts
//! - Shift, production and downtime logs
//! - Derived efficiency and bottleneck records
//! - The error facility (`ExError`, `ExErrorKind`, `TrackerError`)
//! - The result `Envelope` returned at the gateway boundary
//! - The structured logging facility
//! - Shift admission policies

pub mod envelope;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;

/// Paths used by the logging macros, so callers need no direct dependency
#[doc(hidden)]
pub mod __log {
    pub use celltrack_core_types::schema;
    pub use tracing;
}

// Re-export commonly used types
pub use envelope::{Envelope, WireEnvelope};
pub use errors::{ExError, ExErrorKind, Result, TrackerError};
pub use model::{
    Attributes, BottleneckAnalysis, Cell, Company, DateRange, DowntimeLog, EfficiencyMetric,
    EntityKind, Machine, Part, ProductionLog, Shift, Site, ValueStream,
};
pub use policy::{ShiftPolicy, SingleActiveShiftPolicy, UnrestrictedShiftPolicy};
