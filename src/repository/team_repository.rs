use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{NewTeamMember, TeamMember, TeamMemberChanges, User},
    error::{AppError, Result},
    repository::{parse_id, utc, TeamRepository},
};

// Team member joined with its owning user
#[derive(FromRow)]
struct TeamMemberRow {
    id: String,
    user_id: String,
    role: String,
    department: String,
    bio: String,
    linkedin: Option<String>,
    twitter: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    user_name: String,
    user_email: String,
    user_avatar: Option<String>,
    user_created_at: NaiveDateTime,
    user_updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    avatar: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const SELECT_MEMBERS: &str = r#"
    SELECT t.id, t.user_id, t.role, t.department, t.bio, t.linkedin, t.twitter,
           t.created_at, t.updated_at,
           u.name AS user_name, u.email AS user_email, u.avatar AS user_avatar,
           u.created_at AS user_created_at, u.updated_at AS user_updated_at
    FROM team_members t
    JOIN users u ON u.id = t.user_id
"#;

pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_member(row: TeamMemberRow) -> Result<TeamMember> {
        let user_id = parse_id(&row.user_id)?;
        Ok(TeamMember {
            id: parse_id(&row.id)?,
            user_id,
            role: row.role,
            department: row.department,
            bio: row.bio,
            linkedin: row.linkedin,
            twitter: row.twitter,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
            user: User {
                id: user_id,
                name: row.user_name,
                email: row.user_email,
                avatar: row.user_avatar,
                created_at: utc(row.user_created_at),
                updated_at: utc(row.user_updated_at),
            },
        })
    }

    fn row_to_user(row: UserRow) -> Result<User> {
        Ok(User {
            id: parse_id(&row.id)?,
            name: row.name,
            email: row.email,
            avatar: row.avatar,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn create(&self, member: NewTeamMember) -> Result<TeamMember> {
        let id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, avatar, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(user_id.to_string())
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.avatar)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO team_members (
                id, user_id, role, department, bio, linkedin, twitter,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&member.role)
        .bind(&member.department)
        .bind(&member.bio)
        .bind(&member.linkedin)
        .bind(&member.twitter)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created team member".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamMember>> {
        let query = format!("{} WHERE t.id = ?", SELECT_MEMBERS);
        let row = sqlx::query_as::<_, TeamMemberRow>(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_member).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, avatar, created_at, updated_at
            FROM users
            WHERE email = ?
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn list(&self, department: Option<&str>) -> Result<Vec<TeamMember>> {
        let query = format!(
            "{} WHERE (? IS NULL OR t.department = ?) ORDER BY t.created_at ASC",
            SELECT_MEMBERS
        );
        let rows = sqlx::query_as::<_, TeamMemberRow>(&query)
            .bind(department)
            .bind(department)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_member).collect()
    }

    async fn update(&self, id: Uuid, changes: TeamMemberChanges) -> Result<TeamMember> {
        let mut member = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;
        changes.apply_to(&mut member);
        let now = Utc::now().naive_utc();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, avatar = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&member.user.name)
        .bind(&member.user.email)
        .bind(&member.user.avatar)
        .bind(now)
        .bind(member.user_id.to_string())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE team_members
            SET role = ?, department = ?, bio = ?, linkedin = ?, twitter = ?,
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&member.role)
        .bind(&member.department)
        .bind(&member.bio)
        .bind(&member.linkedin)
        .bind(&member.twitter)
        .bind(now)
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated team member".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let member = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(member.user_id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn count_in_department(&self, department: &str) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM team_members WHERE department = ?"
        )
        .bind(department)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }
}
