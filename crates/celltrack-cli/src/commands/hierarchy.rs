//! Hierarchy listings

use crate::commands::emit;
use crate::Session;
use celltrack_core::model::Cell;
use clap::Args;

#[derive(Debug, Args)]
pub struct CellsArgs {
    /// Only cells in this value stream
    #[arg(long)]
    pub value_stream: Option<String>,
}

pub async fn tree(session: &Session) -> anyhow::Result<bool> {
    let ctx = session.context()?;
    emit(&session.gateway.hierarchy_tree(&ctx).await)
}

pub async fn cells(session: &Session, args: CellsArgs) -> anyhow::Result<bool> {
    let ctx = session.context()?;
    let envelope = match args.value_stream {
        Some(value_stream_id) => {
            session
                .gateway
                .list_by_parent::<Cell>(&ctx, &value_stream_id)
                .await
        }
        None => session.gateway.list::<Cell>(&ctx).await,
    };
    emit(&envelope)
}
