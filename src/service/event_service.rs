use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{Event, EventRegistration, NewRegistration},
    error::{AppError, Result},
    repository::EventRepository,
};

pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: Uuid) -> Result<Event> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Event not found".to_string())
        })
    }

    /// Register someone for an event that is still open and has room
    pub async fn register(&self, event_id: Uuid, request: NewRegistration) -> Result<EventRegistration> {
        let event = self.get(event_id).await?;

        if !event.is_open() {
            return Err(AppError::BadRequest(format!(
                "Registration is closed for this event ({})",
                event.status.as_str()
            )));
        }

        if event.is_full() {
            return Err(AppError::BadRequest("Event is full".to_string()));
        }

        let registration = self.repo.register(event_id, request).await?;
        tracing::info!("New registration for event {}", event.title);
        Ok(registration)
    }
}
