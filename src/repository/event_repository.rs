use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Event, EventChanges, EventFilter, EventRegistration, EventStatus, NewEvent, NewRegistration},
    error::{AppError, Result},
    repository::{parse_id, utc, EventRepository},
};

#[derive(FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: String,
    date: NaiveDateTime,
    time: String,
    location: String,
    capacity: i64,
    status: String,
    category: String,
    attendees: i64,
    image: Option<String>,
    registration_url: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct RegistrationRow {
    id: String,
    event_id: String,
    name: String,
    email: String,
    created_at: NaiveDateTime,
}

const SELECT_EVENTS: &str = r#"
    SELECT e.id, e.title, e.description, e.date, e.time, e.location,
           e.capacity, e.status, e.category,
           (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id) AS attendees,
           e.image, e.registration_url, e.created_at, e.updated_at
    FROM events e
"#;

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: EventRow) -> Result<Event> {
        Ok(Event {
            id: parse_id(&row.id)?,
            title: row.title,
            description: row.description,
            date: utc(row.date),
            time: row.time,
            location: row.location,
            capacity: row.capacity,
            status: EventStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid event status: {}", row.status)))?,
            category: row.category,
            attendees: row.attendees,
            image: row.image,
            registration_url: row.registration_url,
            created_at: utc(row.created_at),
            updated_at: utc(row.updated_at),
        })
    }

    fn row_to_registration(row: RegistrationRow) -> Result<EventRegistration> {
        Ok(EventRegistration {
            id: parse_id(&row.id)?,
            event_id: parse_id(&row.event_id)?,
            name: row.name,
            email: row.email,
            created_at: utc(row.created_at),
        })
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, date, time, location, capacity,
                status, category, image, registration_url, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(id.to_string())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date.naive_utc())
        .bind(&event.time)
        .bind(&event.location)
        .bind(event.capacity)
        .bind(event.status.as_str())
        .bind(&event.category)
        .bind(&event.image)
        .bind(&event.registration_url)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created event".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let query = format!("{} WHERE e.id = ?", SELECT_EVENTS);
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_event).transpose()
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let query = format!(
            "{} WHERE (? IS NULL OR e.status = ?) AND (? IS NULL OR e.category = ?) ORDER BY e.date ASC, e.created_at ASC",
            SELECT_EVENTS
        );
        let status = filter.status.map(|s| s.as_str());

        let rows = sqlx::query_as::<_, EventRow>(&query)
            .bind(status)
            .bind(status)
            .bind(&filter.category)
            .bind(&filter.category)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn update(&self, id: Uuid, changes: EventChanges) -> Result<Event> {
        let mut event = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        changes.apply_to(&mut event);

        sqlx::query(
            r#"
            UPDATE events
            SET title = ?, description = ?, date = ?, time = ?, location = ?,
                capacity = ?, status = ?, category = ?, image = ?,
                registration_url = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date.naive_utc())
        .bind(&event.time)
        .bind(&event.location)
        .bind(event.capacity)
        .bind(event.status.as_str())
        .bind(&event.category)
        .bind(&event.image)
        .bind(&event.registration_url)
        .bind(Utc::now().naive_utc())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated event".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM event_registrations WHERE event_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn register(&self, event_id: Uuid, registration: NewRegistration) -> Result<EventRegistration> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        // The open/capacity check and the insert are one statement, so
        // concurrent registrations cannot overbook an event.
        let result = sqlx::query(
            r#"
            INSERT INTO event_registrations (id, event_id, name, email, created_at)
            SELECT ?, e.id, ?, ?, ?
            FROM events e
            WHERE e.id = ?
              AND e.status IN ('UPCOMING', 'ONGOING')
              AND (e.capacity <= 0
                   OR (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id) < e.capacity)
            "#
        )
        .bind(id.to_string())
        .bind(&registration.name)
        .bind(&registration.email)
        .bind(now)
        .bind(event_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict("This email is already registered for the event".to_string())
            }
            other => other,
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::BadRequest(
                "Event is full or closed for registration".to_string(),
            ));
        }

        Ok(EventRegistration {
            id,
            event_id,
            name: registration.name,
            email: registration.email,
            created_at: utc(now),
        })
    }

    async fn list_registrations(&self, event_id: Uuid) -> Result<Vec<EventRegistration>> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT id, event_id, name, email, created_at
            FROM event_registrations
            WHERE event_id = ?
            ORDER BY created_at ASC
            "#
        )
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_registration).collect()
    }
}
