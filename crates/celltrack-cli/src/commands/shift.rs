//! Shift commands, always scoped to `--user`

use crate::commands::emit;
use crate::Session;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ShiftArgs {
    #[command(subcommand)]
    pub command: ShiftCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShiftCommand {
    /// Open a shift
    Start {
        /// Cell the operator is stationed at
        #[arg(long)]
        cell: Option<String>,
    },
    /// Close one of your shifts
    End { shift_id: String },
    /// Show your active shift
    Active,
    /// List your shifts, newest first
    List,
}

pub async fn execute(session: &Session, args: ShiftArgs) -> anyhow::Result<bool> {
    let ctx = session.context()?;
    let gateway = &session.gateway;

    match args.command {
        ShiftCommand::Start { cell } => emit(&gateway.start_shift(&ctx, cell).await),
        ShiftCommand::End { shift_id } => emit(&gateway.end_shift(&ctx, &shift_id).await),
        ShiftCommand::Active => emit(&gateway.get_active_shift(&ctx).await),
        ShiftCommand::List => emit(&gateway.list_shifts(&ctx).await),
    }
}
