//! Schema initialization
//!
//! Runs once after the pool comes up. Everything here is IF NOT EXISTS,
//! so re-running on every process start is safe; the caller treats
//! failure as non-fatal because the store may already carry a
//! compatible schema.

use sqlx::PgPool;

/// Create the users table and its indexes if absent.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("initializing schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            age INT NOT NULL,
            city TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_name ON users (name)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_city ON users (city)")
        .execute(pool)
        .await?;

    tracing::info!("schema ready");
    Ok(())
}
