//! Database pool management
//!
//! The pool is built once at process start and shared by every operation.

use crate::errors::{from_sqlx, Result};
use celltrack_core::errors::{ExError, TrackerError};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection pool parameters
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub create_if_missing: bool,
}

impl PoolSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            create_if_missing: true,
        }
    }
}

/// Open a pool against a file-backed database
///
/// Foreign keys are enforced and the journal runs in WAL mode so readers do
/// not block the single writer.
pub async fn connect(settings: &PoolSettings) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(from_sqlx)?
        .create_if_missing(settings.create_if_missing)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(from_sqlx)?;

    tracing::debug!(
        max_connections = settings.max_connections,
        "Opened SQLite pool"
    );

    Ok(pool)
}

/// Open an in-memory database (for testing)
///
/// Every connection to `sqlite::memory:` is a separate database, so the pool
/// is pinned to a single connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(from_sqlx)?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(from_sqlx)
}

/// A transaction that holds the write lock from its first statement
///
/// `Pool::begin` issues a deferred `BEGIN`: a transaction that reads before
/// it writes has to upgrade its lock, and SQLite refuses that upgrade with
/// `SQLITE_BUSY` without consulting the busy timeout. Read-then-write
/// operations use this instead so concurrent writers queue on the lock.
///
/// Finish with [`WriteTx::finish`]. A guard dropped while still open detaches
/// and closes its connection, which rolls the transaction back.
pub struct WriteTx {
    conn: Option<PoolConnection<Sqlite>>,
}

impl WriteTx {
    /// Acquire a connection and run `BEGIN IMMEDIATE` on it
    pub async fn begin(pool: &SqlitePool) -> Result<Self> {
        let mut conn = pool.acquire().await.map_err(from_sqlx)?;
        (&mut *conn)
            .execute("BEGIN IMMEDIATE")
            .await
            .map_err(|e| from_sqlx(e).with_op("begin_immediate"))?;
        Ok(Self { conn: Some(conn) })
    }

    pub fn conn(&mut self) -> Result<&mut SqliteConnection> {
        self.conn.as_deref_mut().ok_or_else(|| {
            ExError::from(TrackerError::Internal {
                message: "write transaction already finished".to_string(),
            })
            .with_op("write_tx")
        })
    }

    /// Commit when `outcome` is `Ok`, roll back otherwise
    ///
    /// The error of `outcome` wins over a failed rollback.
    pub async fn finish<T>(mut self, outcome: Result<T>) -> Result<T> {
        let Some(mut conn) = self.conn.take() else {
            return outcome;
        };
        match outcome {
            Ok(value) => match (&mut *conn).execute("COMMIT").await {
                Ok(_) => Ok(value),
                Err(e) => {
                    drop(conn.detach());
                    Err(from_sqlx(e).with_op("commit"))
                }
            },
            Err(err) => {
                if let Err(rollback) = (&mut *conn).execute("ROLLBACK").await {
                    tracing::warn!(error = %rollback, "Rollback failed; closing connection");
                    drop(conn.detach());
                }
                Err(err)
            }
        }
    }
}

impl Drop for WriteTx {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            drop(conn.detach());
        }
    }
}
