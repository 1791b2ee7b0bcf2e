//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, owner, original_url, short_code, title, clicks, created_at, clicks_at";

/// Storage row shape; mapped into the domain entity, never exposed outward.
#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    owner: Option<i64>,
    original_url: String,
    short_code: String,
    title: Option<String>,
    clicks: i64,
    created_at: DateTime<Utc>,
    clicks_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            owner: row.owner,
            original_url: row.original_url,
            short_code: row.short_code,
            title: row.title,
            clicks: row.clicks,
            created_at: row.created_at,
            clicks_at: row.clicks_at,
        }
    }
}

/// PostgreSQL repository for shortened links.
///
/// Click recording and ownership scoping are single statements; the database
/// serializes concurrent writers, so no read-modify-write pair exists here.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (owner, original_url, short_code, title)
             VALUES ($1, $2, $3, $4)
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(new_link.owner)
            .bind(&new_link.original_url)
            .bind(&new_link.short_code)
            .bind(&new_link.title)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn record_click(&self, code: &str) -> Result<bool, AppError> {
        // Atomic increment: concurrent clicks on the same code all count.
        let result = sqlx::query(
            "UPDATE links SET clicks = clicks + 1, clicks_at = now() WHERE short_code = $1",
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner: i64) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE owner = $1 ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(owner)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        id: i64,
        owner: i64,
        patch: LinkPatch,
    ) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "UPDATE links
             SET original_url = COALESCE($3, original_url),
                 title = COALESCE($4, title)
             WHERE id = $1 AND owner = $2
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .bind(owner)
            .bind(&patch.original_url)
            .bind(&patch.title)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64, owner: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
