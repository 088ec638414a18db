use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Announcement, AnnouncementChanges, NewAnnouncement},
    error::{AppError, Result},
    repository::{bool_to_int, parse_id, utc, AnnouncementRepository},
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: String,
    title: String,
    content: String,
    is_active: i32,
    priority: i64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
        Ok(Announcement {
            id: parse_id(&row.id)?,
            title: row.title,
            content: row.content,
            is_active: row.is_active != 0,
            priority: row.priority,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO announcements (
                id, title, content, is_active, priority, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(bool_to_int(announcement.is_active))
        .bind(announcement.priority)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, content, is_active, priority, created_at, updated_at
            FROM announcements
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_announcement).transpose()
    }

    async fn list(&self, active: Option<bool>) -> Result<Vec<Announcement>> {
        let active = active.map(bool_to_int);
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, content, is_active, priority, created_at, updated_at
            FROM announcements
            WHERE (? IS NULL OR is_active = ?)
            ORDER BY priority DESC, created_at DESC
            "#
        )
        .bind(active)
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_announcement)
            .collect()
    }

    async fn update(&self, id: Uuid, changes: AnnouncementChanges) -> Result<Announcement> {
        let mut announcement = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))?;
        changes.apply_to(&mut announcement);

        sqlx::query(
            r#"
            UPDATE announcements
            SET title = ?, content = ?, is_active = ?, priority = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(bool_to_int(announcement.is_active))
        .bind(announcement.priority)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated announcement".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Announcement not found".to_string()));
        }
        Ok(())
    }
}
