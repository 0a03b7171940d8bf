//! Startup gate that blocks until the store is reachable.
//!
//! The retry loop is generic over the connector so it can be exercised in
//! tests with a fake that never touches the network. Per-request connection
//! failures are handled at the request boundary, not here.

use crate::error::{StoreError, StoreResult};
use sqlx::Connection;
use sqlx::AnyConnection;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Attempt to connect up to `max_attempts` times, sleeping `retry_delay`
/// between failures. Returns `StoreError::Unreachable` once the budget is
/// exhausted.
pub async fn wait_for_store<C, Fut, E>(
    mut connect: C,
    max_attempts: u32,
    retry_delay: Duration,
) -> StoreResult<()>
where
    C: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    for attempt in 1..=max_attempts {
        match connect().await {
            Ok(()) => {
                info!(attempt, "Store connection successful");
                return Ok(());
            }
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "Store connection attempt failed");
                if attempt < max_attempts {
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }

    Err(StoreError::Unreachable {
        attempts: max_attempts,
    })
}

/// Open and immediately close a connection to the given URL.
///
/// Probes at the server level (no database selected) so readiness does not
/// depend on the target database existing yet; schema initialization
/// creates it afterwards.
pub async fn probe_server(url: &str) -> Result<(), sqlx::Error> {
    let conn = AnyConnection::connect(url).await?;
    conn.close().await
}

/// Block until the server at `url` accepts a connection.
pub async fn wait_for_server(
    url: &str,
    max_attempts: u32,
    retry_delay: Duration,
) -> StoreResult<()> {
    super::install_drivers();
    wait_for_store(|| probe_server(url), max_attempts, retry_delay).await
}
