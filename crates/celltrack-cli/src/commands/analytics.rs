//! Bottleneck and efficiency queries

use crate::commands::{emit, parse_cell_range};
use crate::Session;
use clap::Args;

#[derive(Debug, Args)]
pub struct RangeArgs {
    #[arg(long)]
    pub cell: String,

    /// First day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,
}

#[derive(Debug, Args)]
pub struct EfficiencyArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Print averages instead of the daily rows
    #[arg(long)]
    pub summary: bool,
}

pub async fn bottleneck(session: &Session, args: RangeArgs) -> anyhow::Result<bool> {
    let ctx = session.context()?;
    let query = match parse_cell_range(&args.cell, &args.from, &args.to) {
        Ok(query) => query,
        Err(envelope) => return emit::<()>(&envelope),
    };
    emit(&session.gateway.get_bottleneck_analysis(&ctx, &query).await)
}

pub async fn efficiency(session: &Session, args: EfficiencyArgs) -> anyhow::Result<bool> {
    let ctx = session.context()?;
    let range = args.range;
    let query = match parse_cell_range(&range.cell, &range.from, &range.to) {
        Ok(query) => query,
        Err(envelope) => return emit::<()>(&envelope),
    };

    if args.summary {
        emit(&session.gateway.get_efficiency_summary(&ctx, &query).await)
    } else {
        emit(&session.gateway.get_efficiency_metrics(&ctx, &query).await)
    }
}
