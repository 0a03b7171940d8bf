//! Database layer for the taskboard.
//!
//! The store is reached through sqlx's `Any` driver so the same code path
//! serves MySQL in production and SQLite in the test suite. Every operation
//! draws a connection from the pool for the duration of the call; the pool
//! reclaims it on every exit path, including errors.

pub mod provision;
pub mod schema;
pub mod tasks;

use crate::error::{StoreError, StoreResult};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::sync::Once;
use std::time::Duration;

static DRIVERS: Once = Once::new();

/// Register the compiled-in `Any` drivers. Safe to call more than once.
pub fn install_drivers() {
    DRIVERS.call_once(sqlx::any::install_default_drivers);
}

/// Database handle wrapping a connection pool.
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Open a pool against the given connection URL.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        install_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await
            .map_err(StoreError::Operation)?;
        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Read-only liveness probe: issue a constant query and expect exactly
    /// one row back.
    pub async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").fetch_one(&mut *conn).await?;
        Ok(())
    }
}

/// Get the current timestamp in milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
