//! Production and downtime logs

use crate::commands::analytics::RangeArgs;
use crate::commands::{emit, parse_cell_range, parse_range, parse_timestamp};
use crate::Session;
use celltrack_core::model::DowntimeDraft;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProductionArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Per-day totals instead of individual entries
    #[arg(long)]
    pub daily: bool,
}

#[derive(Debug, Args)]
pub struct DowntimeArgs {
    #[command(subcommand)]
    pub command: DowntimeCommand,
}

#[derive(Debug, Subcommand)]
pub enum DowntimeCommand {
    /// Record a stoppage against a production run
    Log(LogArgs),
    /// Events for one run
    Run {
        run_id: String,
    },
    /// Events starting within a date range
    Range {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

#[derive(Debug, Args)]
pub struct LogArgs {
    #[arg(long)]
    pub run: String,

    #[arg(long)]
    pub reason: String,

    /// RFC 3339 timestamp
    #[arg(long)]
    pub start: String,

    /// Minutes; not validated
    #[arg(long, allow_negative_numbers = true)]
    pub duration: i64,
}

pub async fn production(session: &Session, args: ProductionArgs) -> anyhow::Result<bool> {
    let ctx = session.context()?;
    let range = args.range;
    let query = match parse_cell_range(&range.cell, &range.from, &range.to) {
        Ok(query) => query,
        Err(envelope) => return emit::<()>(&envelope),
    };

    if args.daily {
        emit(&session.gateway.get_daily_production(&ctx, &query).await)
    } else {
        emit(&session.gateway.get_production_logs(&ctx, &query).await)
    }
}

pub async fn downtime(session: &Session, args: DowntimeArgs) -> anyhow::Result<bool> {
    let ctx = session.context()?;

    match args.command {
        DowntimeCommand::Log(log) => {
            let start_time = match parse_timestamp(&log.start) {
                Ok(ts) => ts,
                Err(envelope) => return emit::<()>(&envelope),
            };
            let draft = DowntimeDraft {
                run_id: log.run,
                reason: log.reason,
                start_time,
                duration_minutes: log.duration,
            };
            emit(&session.gateway.log_downtime(&ctx, draft).await)
        }
        DowntimeCommand::Run { run_id } => {
            emit(&session.gateway.get_downtime_for_run(&ctx, &run_id).await)
        }
        DowntimeCommand::Range { from, to } => {
            let range = match parse_range(&from, &to) {
                Ok(range) => range,
                Err(envelope) => return emit::<()>(&envelope),
            };
            emit(&session.gateway.get_downtime_in_range(&ctx, &range).await)
        }
    }
}
