use serde::{Deserialize, Serialize};

/// Every table-backed entity the gateway knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Company,
    Site,
    ValueStream,
    Cell,
    Machine,
    Part,
    Shift,
    ProductionLog,
    DowntimeLog,
    EfficiencyMetric,
    BottleneckAnalysis,
}

impl EntityKind {
    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Company => "companies",
            EntityKind::Site => "sites",
            EntityKind::ValueStream => "value_streams",
            EntityKind::Cell => "cells",
            EntityKind::Machine => "machines",
            EntityKind::Part => "parts",
            EntityKind::Shift => "shifts",
            EntityKind::ProductionLog => "production_logs",
            EntityKind::DowntimeLog => "downtime_logs",
            EntityKind::EfficiencyMetric => "efficiency_metrics",
            EntityKind::BottleneckAnalysis => "bottleneck_analyses",
        }
    }

    /// Human-readable singular label, used in envelope messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::Site => "site",
            EntityKind::ValueStream => "value stream",
            EntityKind::Cell => "cell",
            EntityKind::Machine => "machine",
            EntityKind::Part => "part",
            EntityKind::Shift => "shift",
            EntityKind::ProductionLog => "production log",
            EntityKind::DowntimeLog => "downtime log",
            EntityKind::EfficiencyMetric => "efficiency metric",
            EntityKind::BottleneckAnalysis => "bottleneck analysis",
        }
    }

    /// Plural label for list operations
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Company => "companies",
            EntityKind::Site => "sites",
            EntityKind::ValueStream => "value streams",
            EntityKind::Cell => "cells",
            EntityKind::Machine => "machines",
            EntityKind::Part => "parts",
            EntityKind::Shift => "shifts",
            EntityKind::ProductionLog => "production logs",
            EntityKind::DowntimeLog => "downtime logs",
            EntityKind::EfficiencyMetric => "efficiency metrics",
            EntityKind::BottleneckAnalysis => "bottleneck analyses",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
