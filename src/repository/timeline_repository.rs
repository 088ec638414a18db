use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{Sqlite, SqlitePool, FromRow, Transaction};
use uuid::Uuid;

use crate::{
    domain::{NewTask, NewTimelineItem, TimelineItem, TimelineItemChanges, TimelineStatus, TimelineTask},
    error::{AppError, Result},
    repository::{bool_to_int, parse_id, utc, TimelineRepository},
};

#[derive(FromRow)]
struct TimelineItemRow {
    id: String,
    title: String,
    description: String,
    status: String,
    due_date: NaiveDateTime,
    sort_order: i64,
    completed_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct TimelineTaskRow {
    id: String,
    timeline_item_id: String,
    title: String,
    completed: i32,
    position: i64,
}

pub struct SqliteTimelineRepository {
    pool: SqlitePool,
}

impl SqliteTimelineRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: TimelineItemRow, tasks: Vec<TimelineTask>) -> Result<TimelineItem> {
        Ok(TimelineItem {
            id: parse_id(&row.id)?,
            title: row.title,
            description: row.description,
            status: TimelineStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid timeline status: {}", row.status)))?,
            due_date: utc(row.due_date),
            order: row.sort_order,
            completed_at: row.completed_at.map(utc),
            tasks,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }

    fn row_to_task(row: TimelineTaskRow) -> Result<TimelineTask> {
        Ok(TimelineTask {
            id: parse_id(&row.id)?,
            title: row.title,
            completed: row.completed != 0,
            position: row.position,
        })
    }

    async fn tasks_for(&self, item_id: &str) -> Result<Vec<TimelineTask>> {
        let rows = sqlx::query_as::<_, TimelineTaskRow>(
            r#"
            SELECT id, timeline_item_id, title, completed, position
            FROM timeline_tasks
            WHERE timeline_item_id = ?
            ORDER BY position ASC
            "#
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_task).collect()
    }

    async fn insert_tasks(
        tx: &mut Transaction<'_, Sqlite>,
        item_id: &str,
        tasks: &[NewTask],
    ) -> Result<()> {
        let now = Utc::now().naive_utc();
        for (position, task) in tasks.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO timeline_tasks (id, timeline_item_id, title, completed, position, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#
            )
            .bind(Uuid::new_v4().to_string())
            .bind(item_id)
            .bind(&task.title)
            .bind(bool_to_int(task.completed))
            .bind(position as i64)
            .bind(now)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TimelineRepository for SqliteTimelineRepository {
    async fn create(&self, item: NewTimelineItem) -> Result<TimelineItem> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().naive_utc();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO timeline_items (
                id, title, description, status, due_date, sort_order,
                completed_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&id_str)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.status.as_str())
        .bind(item.due_date.naive_utc())
        .bind(item.order)
        .bind(item.completed_at.map(|dt| dt.naive_utc()))
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        Self::insert_tasks(&mut tx, &id_str, &item.tasks).await?;
        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created timeline item".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TimelineItem>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, TimelineItemRow>(
            r#"
            SELECT id, title, description, status, due_date, sort_order,
                   completed_at, created_at, updated_at
            FROM timeline_items
            WHERE id = ?
            "#
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                let tasks = self.tasks_for(&id_str).await?;
                Ok(Some(Self::row_to_item(r, tasks)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, status: Option<TimelineStatus>) -> Result<Vec<TimelineItem>> {
        let status = status.map(|s| s.as_str());
        let rows = sqlx::query_as::<_, TimelineItemRow>(
            r#"
            SELECT id, title, description, status, due_date, sort_order,
                   completed_at, created_at, updated_at
            FROM timeline_items
            WHERE (? IS NULL OR status = ?)
            ORDER BY sort_order ASC, created_at ASC
            "#
        )
        .bind(status)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        let task_rows = sqlx::query_as::<_, TimelineTaskRow>(
            r#"
            SELECT id, timeline_item_id, title, completed, position
            FROM timeline_tasks
            ORDER BY position ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tasks_by_item: HashMap<String, Vec<TimelineTask>> = HashMap::new();
        for row in task_rows {
            let item_id = row.timeline_item_id.clone();
            tasks_by_item.entry(item_id).or_default().push(Self::row_to_task(row)?);
        }

        rows.into_iter()
            .map(|row| {
                let tasks = tasks_by_item.remove(&row.id).unwrap_or_default();
                Self::row_to_item(row, tasks)
            })
            .collect()
    }

    async fn update(&self, id: Uuid, changes: TimelineItemChanges) -> Result<TimelineItem> {
        let mut item = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Timeline item not found".to_string()))?;
        changes.apply_to(&mut item);
        let id_str = id.to_string();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE timeline_items
            SET title = ?, description = ?, status = ?, due_date = ?,
                sort_order = ?, completed_at = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.status.as_str())
        .bind(item.due_date.naive_utc())
        .bind(item.order)
        .bind(item.completed_at.map(|dt| dt.naive_utc()))
        .bind(Utc::now().naive_utc())
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        if let Some(tasks) = &changes.tasks {
            sqlx::query("DELETE FROM timeline_tasks WHERE timeline_item_id = ?")
                .bind(&id_str)
                .execute(&mut *tx)
                .await?;
            Self::insert_tasks(&mut tx, &id_str, tasks).await?;
        }

        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated timeline item".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM timeline_tasks WHERE timeline_item_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM timeline_items WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Timeline item not found".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }
}
