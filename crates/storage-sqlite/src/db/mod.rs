//! Connection pool, migrations and the single-writer actor.

use log::{error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::{IntoCore, StorageError};
use kepengen_core::errors::{DatabaseError, Error, Result};

pub mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Storage tunables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: String,
    pub pool_size: u32,
    /// Bounds pool checkout, SQLite lock waits and how long a write may
    /// wait in the writer's queue.
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            pool_size: 8,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Makes sure the database file and its directory exist and switches the
/// file to WAL mode.
pub fn init(db_path: &str) -> Result<String> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir).map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "Failed to create database directory: {}",
                    e
                )))
            })?;
        }
    }

    let mut conn = SqliteConnection::establish(db_path).map_err(StorageError::from)?;
    conn.batch_execute(
        "
            PRAGMA journal_mode = WAL;
            PRAGMA foreign_keys = ON;
            PRAGMA synchronous  = NORMAL;
        ",
    )
    .map_err(StorageError::from)?;

    Ok(db_path.to_string())
}

pub fn create_pool(config: &StoreConfig) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.db_path);
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .min_idle(Some(1))
        .connection_timeout(config.timeout)
        .connection_customizer(Box::new(ConnectionCustomizer {
            busy_timeout_ms: write_actor::duration_millis(config.timeout),
        }))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let result = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::Database(DatabaseError::MigrationFailed(e.to_string()))
    })?;

    if result.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        info!("Applied the following migrations:");
        for migration_version in &result {
            info!("  - {}", migration_version);
        }
    }

    Ok(())
}

/// Checks a connection out of the pool, bounded by the pool's
/// `connection_timeout`.
pub fn get_connection(pool: &Pool<ConnectionManager<SqliteConnection>>) -> Result<DbConnection> {
    pool.get().into_core()
}

/// Opens, migrates and wires up a store in one call.
pub fn open(config: &StoreConfig) -> Result<(Arc<DbPool>, WriteHandle)> {
    init(&config.db_path)?;
    let pool = create_pool(config)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone(), config.timeout)?;
    Ok((pool, writer))
}

#[derive(Debug)]
struct ConnectionCustomizer {
    busy_timeout_ms: u64,
}

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = {};
            PRAGMA synchronous = NORMAL;
        ",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)?;

        Ok(())
    }
}
