//! Database connection pool management.
//!
//! Connection pooling for the SQLite record files using r2d2. Opening a pool
//! never touches schema: record files start life as zero-byte placeholders
//! created by bootstrap, and stay that way until `schema` is invoked
//! explicitly.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use waypoint_common::{Error, Result};

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a new database pool for the given record file.
///
/// Creates the SQLite file if it doesn't exist, enables foreign key
/// constraints on every connection, and caps the pool at 4 connections.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite record file
///
/// # Example
///
/// ```no_run
/// use waypoint_db::pool::init_pool;
///
/// let pool = init_pool("/var/data/blog.db").unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        // Enable foreign key constraints on each new connection
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {}", e)))
}

/// Initialize an in-memory database pool for testing.
///
/// The database is lost when the pool is dropped.
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        // Enable foreign key constraints on each new connection
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {}", e)))
}

/// Get a connection from the pool, mapping pool errors into the common type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {}", e)))
}
