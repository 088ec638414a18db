use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Department, DepartmentChanges, NewDepartment},
    error::{AppError, Result},
    repository::{parse_id, utc, DepartmentRepository},
};

#[derive(FromRow)]
struct DepartmentRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteDepartmentRepository {
    pool: SqlitePool,
}

impl SqliteDepartmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_department(row: DepartmentRow) -> Result<Department> {
        Ok(Department {
            id: parse_id(&row.id)?,
            name: row.name,
            description: row.description,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }
}

#[async_trait]
impl DepartmentRepository for SqliteDepartmentRepository {
    async fn create(&self, department: NewDepartment) -> Result<Department> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO departments (id, name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&department.name)
        .bind(&department.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created department".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM departments
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_department).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM departments
            WHERE name = ?
            "#
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_department).transpose()
    }

    async fn list(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM departments
            ORDER BY name ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_department).collect()
    }

    async fn update(&self, id: Uuid, changes: DepartmentChanges) -> Result<Department> {
        let mut department = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;
        changes.apply_to(&mut department);

        sqlx::query(
            r#"
            UPDATE departments
            SET name = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&department.name)
        .bind(&department.description)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated department".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Department not found".to_string()));
        }
        Ok(())
    }
}
