//! Error taxonomy for the task store.
//!
//! Startup errors (`Unreachable`, `SchemaInit`) are fatal: the process must
//! not accept traffic against an unreachable or uninitialized store.
//! `Operation` errors are recovered at the request boundary and turned into
//! a user-visible message; only `/health` surfaces them as an HTTP 500.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store never became reachable within the startup retry budget.
    #[error("store unreachable after {attempts} attempts")]
    Unreachable { attempts: u32 },

    /// Database or table creation failed at startup.
    #[error("schema initialization failed: {0}")]
    SchemaInit(#[source] sqlx::Error),

    /// A per-request statement failed (connection refused, query error).
    #[error("store operation failed: {0}")]
    Operation(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
