//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ShortLinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    creator_ip: String,
    creator_user_agent: String,
    hits: i64,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            creator_ip: row.creator_ip,
            creator_user_agent: row.creator_user_agent,
            hits: row.hits,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for the `short_urls` table.
///
/// Every query is a bound prepared statement executed on the shared pool.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_urls (original_url, short_code, creator_ip, creator_user_agent)
            VALUES ($1, $2, $3, $4)
            RETURNING id, original_url, short_code, creator_ip, creator_user_agent, hits, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(&new_link.creator_ip)
        .bind(&new_link.creator_user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        tracing::info!(
            original_url = %row.original_url,
            short_code = %row.short_code,
            "Short link stored"
        );

        Ok(row.into())
    }

    async fn find_original_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM short_urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn increment_hits(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE short_urls SET hits = hits + 1 WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, original_url, short_code, creator_ip, creator_user_agent, hits, created_at
            FROM short_urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, original_url, short_code, creator_ip, creator_user_agent, hits, created_at
            FROM short_urls
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_hits(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(hits), 0)::BIGINT FROM short_urls",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(total)
    }
}
