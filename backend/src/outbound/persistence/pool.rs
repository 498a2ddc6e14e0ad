//! Connection pool for Diesel SQLite connections.
//!
//! Wraps `r2d2` so repositories share one process-wide pool. Diesel's SQLite
//! connection is synchronous, so [`DbPool::run`] moves each unit of work onto
//! Tokio's blocking pool and re-enters the caller's trace scope there.
//!
//! SQLite enforces foreign keys per connection; every connection handed out by
//! the pool has `foreign_keys` enabled and a busy timeout applied before use.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::domain::TraceId;

/// Schema migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },

    /// Applying schema migrations failed.
    #[error("failed to apply migrations: {message}")]
    Migration { message: String },

    /// The blocking task running the work panicked or was cancelled.
    #[error("blocking database task failed: {message}")]
    Task { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create a migration error with the given message.
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }

    /// Create a task error with the given message.
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use gradebook::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("students.db")
///     .with_max_size(8)
///     .with_connection_timeout(Duration::from_secs(10));
/// assert_eq!(config.database_url(), "students.db");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
    busy_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration for the given SQLite path or URI.
    ///
    /// Defaults:
    /// - `max_size`: 5 connections
    /// - `min_idle`: pool default
    /// - `connection_timeout`: 30 seconds
    /// - `busy_timeout`: 5 seconds
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 5,
            min_idle: None,
            connection_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Set how long SQLite waits on a locked database before failing.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Whether the URL names a private in-memory database.
    ///
    /// Each in-memory connection is its own database, so such pools are
    /// pinned to a single connection that is never recycled.
    pub fn is_in_memory(&self) -> bool {
        let url = self.database_url.as_str();
        url == ":memory:" || url.starts_with("file::memory:") || url.contains("mode=memory")
    }
}

/// Applies per-connection pragmas when r2d2 opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let pragmas = format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        );
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pooled SQLite connection.
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Shared pool of SQLite connections.
///
/// # Example
///
/// ```no_run
/// use gradebook::outbound::persistence::{DbPool, PoolConfig};
///
/// # async fn demo() -> Result<(), gradebook::outbound::persistence::PoolError> {
/// let pool = DbPool::new(PoolConfig::new("students.db"))?;
/// pool.run_migrations().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed, for
    /// example when the database file cannot be opened.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.as_str());
        let builder = Pool::builder()
            .connection_timeout(config.connection_timeout)
            .connection_customizer(Box::new(SqlitePragmas {
                busy_timeout: config.busy_timeout,
            }));

        let builder = if config.is_in_memory() {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .max_lifetime(None)
                .idle_timeout(None)
        } else {
            builder.max_size(config.max_size).min_idle(config.min_idle)
        };

        let pool = builder
            .build(manager)
            .map_err(|err| PoolError::build(err.to_string()))?;
        debug!(
            database_url = config.database_url.as_str(),
            max_size = pool.max_size(),
            "sqlite pool ready"
        );
        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool, blocking until one is available.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub fn get(&self) -> Result<SqlitePooledConnection, PoolError> {
        self.inner
            .get()
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Run `work` with a pooled connection on the blocking thread pool.
    ///
    /// Pool and task failures are converted with `pool_error`; errors from
    /// `work` itself are returned unchanged.
    pub async fn run<T, E, F, P>(&self, work: F, pool_error: P) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, E> + Send + 'static,
        P: FnOnce(PoolError) -> E,
        T: Send + 'static,
        E: Send + 'static,
    {
        let pool = self.clone();
        let trace_id = TraceId::current();
        let joined = tokio::task::spawn_blocking(move || {
            let job = move || -> Result<Result<T, E>, PoolError> {
                let mut conn = pool.get()?;
                Ok(work(&mut conn))
            };
            match trace_id {
                Some(id) => TraceId::sync_scope(id, job),
                None => job(),
            }
        })
        .await;

        match joined {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => Err(pool_error(err)),
            Err(err) => Err(pool_error(PoolError::task(err.to_string()))),
        }
    }

    /// Apply pending schema migrations.
    ///
    /// Safe to call on every start; already applied migrations are skipped.
    /// Returns the number of migrations that ran.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Migration` when a migration fails.
    pub async fn run_migrations(&self) -> Result<usize, PoolError> {
        let applied = self
            .run(
                |conn| {
                    conn.run_pending_migrations(MIGRATIONS)
                        .map(|versions| versions.len())
                        .map_err(|err| PoolError::migration(err.to_string()))
                },
                |err| err,
            )
            .await?;
        info!(applied, "database schema up to date");
        Ok(applied)
    }
}
