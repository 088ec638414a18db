use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    domain::{NewPageView, PageCount, PageView},
    error::Result,
    repository::PageViewRepository,
};

pub struct SqlitePageViewRepository {
    pool: SqlitePool,
}

impl SqlitePageViewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageViewRepository for SqlitePageViewRepository {
    async fn record(&self, view: NewPageView) -> Result<PageView> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO page_views (id, page, referrer, user_agent, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&view.page)
        .bind(&view.referrer)
        .bind(&view.user_agent)
        .bind(now.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(PageView {
            id,
            page: view.page,
            referrer: view.referrer,
            user_agent: view.user_agent,
            created_at: now,
        })
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM page_views")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM page_views WHERE created_at >= ?")
            .bind(since.naive_utc())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn top_pages(&self, limit: i64) -> Result<Vec<PageCount>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT page, COUNT(*) AS views
            FROM page_views
            GROUP BY page
            ORDER BY views DESC, page ASC
            LIMIT ?
            "#
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(page, views)| PageCount { page, views })
            .collect())
    }
}
