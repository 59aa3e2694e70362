//! Schema and seed administration
//!
//! Usage: celltrack migrate | celltrack seed import <PATH>

use crate::commands::emit;
use crate::Session;
use celltrack_core::Envelope;
use celltrack_store::seed::ImportReport;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every `.yaml` file in a directory
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Migrations already ran when the gateway connected; report what is applied
pub async fn migrate(session: &Session) -> anyhow::Result<bool> {
    let envelope = match celltrack_store::migrations::applied_migrations(session.gateway.pool())
        .await
    {
        Ok(applied) => Envelope::ok("Migrations applied successfully", applied),
        Err(err) => Envelope::from_error(&err, "Failed to apply migrations"),
    };
    emit(&envelope)
}

pub async fn seed(session: &Session, args: SeedArgs) -> anyhow::Result<bool> {
    match args.command {
        SeedCommand::Import(import_args) => import(session, import_args).await,
    }
}

async fn import(session: &Session, args: ImportArgs) -> anyhow::Result<bool> {
    let files = seed_files(&args.path)?;

    let mut reports: Vec<ImportReport> = Vec::with_capacity(files.len());
    for file in files {
        match celltrack_store::seed::import_seed(session.gateway.pool(), &file).await {
            Ok(report) => reports.push(report),
            Err(err) => {
                let envelope: Envelope<()> = Envelope::from_error(
                    &err,
                    format!("Failed to import seed {}", file.display()),
                );
                return emit(&envelope);
            }
        }
    }

    emit(&Envelope::ok("Seed imported successfully", reports))
}

/// A single file, or a directory's `.yaml`/`.yml` files sorted by name
fn seed_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
