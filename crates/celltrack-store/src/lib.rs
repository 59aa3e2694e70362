//! CellTrack Store - SQLite persistence via sqlx
//!
//! Provides:
//! - Pool construction (`db`)
//! - Embedded, checksummed schema migrations
//! - Repositories for the plant hierarchy, shifts, logs and derived metrics
//! - Seed format v1 parser and importer

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use db::{connect, connect_in_memory, PoolSettings, WriteTx};
pub use errors::Result;
pub use sqlx::SqlitePool;
