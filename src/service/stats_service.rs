use std::sync::Arc;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::{
    domain::DashboardStats,
    error::Result,
    repository::PageViewRepository,
};

const TOP_PAGES: i64 = 5;

pub struct StatsService {
    pool: SqlitePool,
    page_view_repo: Arc<dyn PageViewRepository>,
}

impl StatsService {
    pub fn new(pool: SqlitePool, page_view_repo: Arc<dyn PageViewRepository>) -> Self {
        Self { pool, page_view_repo }
    }

    /// Round-trips a trivial query to confirm the database answers.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count(&self, query: &str) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(query).fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let week_ago = Utc::now() - Duration::days(7);

        Ok(DashboardStats {
            total_events: self.count("SELECT COUNT(*) FROM events").await?,
            upcoming_events: self
                .count("SELECT COUNT(*) FROM events WHERE status = 'UPCOMING'")
                .await?,
            team_members: self.count("SELECT COUNT(*) FROM team_members").await?,
            departments: self.count("SELECT COUNT(*) FROM departments").await?,
            timeline_items: self.count("SELECT COUNT(*) FROM timeline_items").await?,
            completed_milestones: self
                .count("SELECT COUNT(*) FROM timeline_items WHERE status = 'COMPLETED'")
                .await?,
            suggestions: self.count("SELECT COUNT(*) FROM idea_suggestions").await?,
            pending_suggestions: self
                .count("SELECT COUNT(*) FROM idea_suggestions WHERE status = 'PENDING'")
                .await?,
            active_announcements: self
                .count("SELECT COUNT(*) FROM announcements WHERE is_active = 1")
                .await?,
            page_views: self.page_view_repo.count().await?,
            page_views_last_7_days: self.page_view_repo.count_since(week_ago).await?,
            top_pages: self.page_view_repo.top_pages(TOP_PAGES).await?,
        })
    }
}
