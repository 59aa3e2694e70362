//! Domain model

pub mod attributes;
pub mod hierarchy;
pub mod kind;
pub mod logs;
pub mod metrics;
pub mod range;
pub mod shift;
pub mod time;

pub use attributes::Attributes;
pub use hierarchy::{
    Cell, CellDraft, CellPatch, Company, CompanyDraft, CompanyPatch, Machine, MachineDraft,
    MachinePatch, Part, PartDraft, PartPatch, Site, SiteDraft, SitePatch, ValueStream,
    ValueStreamDraft, ValueStreamPatch,
};
pub use kind::EntityKind;
pub use logs::{DailyProduction, DowntimeDraft, DowntimeLog, ProductionDraft, ProductionLog};
pub use metrics::{
    BottleneckAnalysis, BottleneckDraft, EfficiencyDraft, EfficiencyMetric, EfficiencySummary,
};
pub use range::{CellRangeQuery, DateRange};
pub use shift::Shift;
