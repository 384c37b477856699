use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use crate::error::{AppError, Result};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_url: &str) -> std::result::Result<DbPool, r2d2::Error> {
    let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    // Remove query parameters (e.g., ?mode=rwc)
    let path = path.split('?').next().unwrap_or(path);

    if path == ":memory:" {
        return create_memory_pool();
    }

    Pool::builder()
        .max_size(5)
        .build(SqliteConnectionManager::file(Path::new(path)))
}

/// Every SQLite `:memory:` connection is its own database, so the pool holds
/// exactly one connection and never recycles it.
pub fn create_memory_pool() -> std::result::Result<DbPool, r2d2::Error> {
    Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(SqliteConnectionManager::memory())
}

/// Run blocking SQLite work on the blocking thread pool with a pooled connection.
pub async fn with_connection<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    F: FnOnce(&mut DbConnection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}
