//! User repository
//!
//! Single-table access: one parameterized insert, one paginated read.
//! The count and page queries run back to back on separate pool
//! checkouts; under concurrent writes they may see different snapshots,
//! which the listing contract accepts.

use sqlx::PgPool;

use crate::models::{NewUser, Paginated, Pagination, User};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// True when no connection became available within the pool's
    /// acquire timeout. Surfaced as 503 rather than 500.
    pub fn is_pool_exhausted(&self) -> bool {
        matches!(self, DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated record, returning it with the
    /// storage-assigned id and timestamp.
    pub async fn insert(&self, new_user: &NewUser) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, age, city)
            VALUES ($1, $2, $3)
            RETURNING id, name, age, city, created_at
            "#,
        )
        .bind(&new_user.name)
        .bind(new_user.age)
        .bind(&new_user.city)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// List records newest-first with pagination metadata.
    ///
    /// Secondary order on `id` keeps pages stable when timestamps tie.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<User>, DbError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        let items = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, city, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }
}
