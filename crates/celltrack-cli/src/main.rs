//! CellTrack CLI
//!
//! Operator interface over the query gateway. Every command prints the
//! resulting envelope as JSON on stdout; logs go to stderr.

use anyhow::Context;
use celltrack_core::logging_facility;
use celltrack_core_types::{Identity, RequestContext, Sensitive};
use celltrack_engine::{AppConfig, Gateway};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "celltrack")]
#[command(about = "CellTrack - manufacturing cell efficiency tracking", long_about = None)]
struct Cli {
    /// Authenticated user the commands run as
    #[arg(long, global = true, env = "CELLTRACK_USER")]
    user: Option<String>,

    /// Database URL, overriding the configured one
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Seed import operations
    Seed(commands::admin::SeedArgs),
    /// Print the whole plant hierarchy
    Tree,
    /// List cells, optionally under one value stream
    Cells(commands::hierarchy::CellsArgs),
    /// Bottleneck analysis for a cell over a date range
    Bottleneck(commands::analytics::RangeArgs),
    /// Efficiency metrics for a cell over a date range
    Efficiency(commands::analytics::EfficiencyArgs),
    /// Production logs for a cell over a date range
    Production(commands::logs::ProductionArgs),
    /// Downtime operations
    Downtime(commands::logs::DowntimeArgs),
    /// Shift operations for the calling user
    Shift(commands::shift::ShiftArgs),
}

/// Resolved per-invocation state handed to each command
pub struct Session {
    pub gateway: Gateway,
    user: Option<String>,
}

impl Session {
    /// Context for a gateway call; requires `--user`
    pub fn context(&self) -> anyhow::Result<RequestContext> {
        let user = self
            .user
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .context("--user (or CELLTRACK_USER) is required for this command")?;
        Ok(RequestContext::new(Identity::new(user)))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command's envelope reported success
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = cli.db {
        config.database.url = Sensitive::new(url);
    }
    logging_facility::init(config.logging.profile);

    let gateway = Gateway::connect(&config)
        .await
        .context("Failed to open database")?;
    let session = Session {
        gateway,
        user: cli.user,
    };

    match cli.command {
        Commands::Migrate => commands::admin::migrate(&session).await,
        Commands::Seed(args) => commands::admin::seed(&session, args).await,
        Commands::Tree => commands::hierarchy::tree(&session).await,
        Commands::Cells(args) => commands::hierarchy::cells(&session, args).await,
        Commands::Bottleneck(args) => commands::analytics::bottleneck(&session, args).await,
        Commands::Efficiency(args) => commands::analytics::efficiency(&session, args).await,
        Commands::Production(args) => commands::logs::production(&session, args).await,
        Commands::Downtime(args) => commands::logs::downtime(&session, args).await,
        Commands::Shift(args) => commands::shift::execute(&session, args).await,
    }
}
