//! rollcall server binary
//!
//! Startup order: tracing, config (fatal on error), database pool with
//! retry, schema init (non-fatal), HTTP server until signal.

use anyhow::{anyhow, Result};
use rollcall_core::Config;
use rollcall_server::db;
use rollcall_server::http;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing().ok();
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        port = config.port,
        pool_size = config.pool_max_connections,
        "starting rollcall"
    );

    let pool = db::connect_with_retry(&config.database.url(), config.pool_max_connections).await;

    // Non-fatal: the store may already carry a compatible schema
    if let Err(err) = db::migrations::run(&pool).await {
        tracing::warn!(error = %err, "schema initialization failed, continuing");
    }

    http::run_server(pool, config).await?;
    Ok(())
}
