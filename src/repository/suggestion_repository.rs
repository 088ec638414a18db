use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{IdeaSuggestion, NewSuggestion, SuggestionChanges, SuggestionFilter, SuggestionStatus},
    error::{AppError, Result},
    repository::{parse_id, utc, SuggestionRepository},
};

#[derive(FromRow)]
struct SuggestionRow {
    id: String,
    title: String,
    description: String,
    category: String,
    submitter_name: Option<String>,
    submitter_email: Option<String>,
    status: String,
    admin_notes: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteSuggestionRepository {
    pool: SqlitePool,
}

impl SqliteSuggestionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_suggestion(row: SuggestionRow) -> Result<IdeaSuggestion> {
        Ok(IdeaSuggestion {
            id: parse_id(&row.id)?,
            title: row.title,
            description: row.description,
            category: row.category,
            submitter_name: row.submitter_name,
            submitter_email: row.submitter_email,
            status: SuggestionStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid suggestion status: {}", row.status)))?,
            admin_notes: row.admin_notes,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }
}

#[async_trait]
impl SuggestionRepository for SqliteSuggestionRepository {
    async fn create(&self, suggestion: NewSuggestion) -> Result<IdeaSuggestion> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO idea_suggestions (
                id, title, description, category, submitter_name, submitter_email,
                status, admin_notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&suggestion.title)
        .bind(&suggestion.description)
        .bind(&suggestion.category)
        .bind(&suggestion.submitter_name)
        .bind(&suggestion.submitter_email)
        .bind(SuggestionStatus::Pending.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created suggestion".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdeaSuggestion>> {
        let row = sqlx::query_as::<_, SuggestionRow>(
            r#"
            SELECT id, title, description, category, submitter_name, submitter_email,
                   status, admin_notes, created_at, updated_at
            FROM idea_suggestions
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_suggestion).transpose()
    }

    async fn list(&self, filter: &SuggestionFilter) -> Result<Vec<IdeaSuggestion>> {
        let status = filter.status.map(|s| s.as_str());
        let rows = sqlx::query_as::<_, SuggestionRow>(
            r#"
            SELECT id, title, description, category, submitter_name, submitter_email,
                   status, admin_notes, created_at, updated_at
            FROM idea_suggestions
            WHERE (? IS NULL OR status = ?)
              AND (? IS NULL OR category = ?)
              AND (? IS NULL OR submitter_email = ?)
            ORDER BY created_at DESC
            "#
        )
        .bind(status)
        .bind(status)
        .bind(&filter.category)
        .bind(&filter.category)
        .bind(&filter.email)
        .bind(&filter.email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_suggestion).collect()
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<IdeaSuggestion>> {
        let filter = SuggestionFilter {
            email: Some(email.to_string()),
            ..Default::default()
        };
        self.list(&filter).await
    }

    async fn update(&self, id: Uuid, changes: SuggestionChanges) -> Result<IdeaSuggestion> {
        let mut suggestion = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Suggestion not found".to_string()))?;
        changes.apply_to(&mut suggestion);

        sqlx::query(
            r#"
            UPDATE idea_suggestions
            SET title = ?, description = ?, category = ?, status = ?,
                admin_notes = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&suggestion.title)
        .bind(&suggestion.description)
        .bind(&suggestion.category)
        .bind(suggestion.status.as_str())
        .bind(&suggestion.admin_notes)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated suggestion".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM idea_suggestions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Suggestion not found".to_string()));
        }
        Ok(())
    }
}
