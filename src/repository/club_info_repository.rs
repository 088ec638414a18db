use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{ClubInfo, ClubInfoChanges, NewClubInfo},
    error::{AppError, Result},
    repository::{parse_id, utc, ClubInfoRepository},
};

#[derive(FromRow)]
struct ClubInfoRow {
    id: String,
    key: String,
    value: String,
    description: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteClubInfoRepository {
    pool: SqlitePool,
}

impl SqliteClubInfoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_info(row: ClubInfoRow) -> Result<ClubInfo> {
        Ok(ClubInfo {
            id: parse_id(&row.id)?,
            key: row.key,
            value: row.value,
            description: row.description,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }
}

#[async_trait]
impl ClubInfoRepository for SqliteClubInfoRepository {
    async fn create(&self, info: NewClubInfo) -> Result<ClubInfo> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO club_info (id, key, value, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&info.key)
        .bind(&info.value)
        .bind(&info.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Club info key '{}' already exists", info.key))
            }
            other => other,
        })?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created club info".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClubInfo>> {
        let row = sqlx::query_as::<_, ClubInfoRow>(
            r#"
            SELECT id, key, value, description, created_at, updated_at
            FROM club_info
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_info).transpose()
    }

    async fn list(&self) -> Result<Vec<ClubInfo>> {
        let rows = sqlx::query_as::<_, ClubInfoRow>(
            r#"
            SELECT id, key, value, description, created_at, updated_at
            FROM club_info
            ORDER BY key ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_info).collect()
    }

    async fn update(&self, id: Uuid, changes: ClubInfoChanges) -> Result<ClubInfo> {
        let mut info = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Club info not found".to_string()))?;
        changes.apply_to(&mut info);

        sqlx::query(
            r#"
            UPDATE club_info
            SET key = ?, value = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&info.key)
        .bind(&info.value)
        .bind(&info.description)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated club info".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM club_info WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Club info not found".to_string()));
        }
        Ok(())
    }
}
