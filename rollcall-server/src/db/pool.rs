//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and an acquire
//! timeout, so a burst of requests waits a bounded time for a
//! connection instead of queueing without limit.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Fixed wait between startup connection attempts
const RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// Longest a request waits for a pooled connection before
/// `PoolTimedOut` (surfaced to clients as 503)
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the initial connection fails.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Connect at startup, retrying every 5 seconds until the store is
/// reachable. No backoff, no attempt cap: the process is useless
/// without its database, so it waits as long as it takes.
pub async fn connect_with_retry(database_url: &str, max_connections: u32) -> PgPool {
    loop {
        match connect(database_url, max_connections).await {
            Ok(pool) => {
                tracing::info!(max_connections, "connected to database");
                return pool;
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    retry_in_secs = RETRY_INTERVAL.as_secs(),
                    "database not ready, retrying"
                );
                tokio::time::sleep(RETRY_INTERVAL).await;
            }
        }
    }
}

/// Liveness probe for the health endpoint. Read-only, bounded by the
/// pool's own acquire timeout.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p rollcall-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, 5).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_succeeds_on_live_pool() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, 2).await.expect("pool creation failed");

        ping(&pool).await.expect("ping failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_fails_after_close() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, 2).await.expect("pool creation failed");

        pool.close().await;
        assert!(ping(&pool).await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, 5).await.expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
