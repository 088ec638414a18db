use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{NewTimelineItem, TimelineItem, TimelineItemChanges, TimelineStatus},
    error::{AppError, Result},
    repository::TimelineRepository,
};

pub struct TimelineService {
    repo: Arc<dyn TimelineRepository>,
}

impl TimelineService {
    pub fn new(repo: Arc<dyn TimelineRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, status: Option<TimelineStatus>) -> Result<Vec<TimelineItem>> {
        self.repo.list(status).await
    }

    /// Create a milestone. Items created as completed without an explicit
    /// completion time are stamped with the current time.
    pub async fn create(&self, mut request: NewTimelineItem) -> Result<TimelineItem> {
        if request.status == TimelineStatus::Completed && request.completed_at.is_none() {
            request.completed_at = Some(Utc::now());
        }
        self.repo.create(request).await
    }

    /// Update a milestone.
    ///
    /// Moving into `COMPLETED` stamps `completedAt` unless the request sets
    /// it; moving out of `COMPLETED` clears it unless the request sets it.
    pub async fn update(&self, id: Uuid, mut request: TimelineItemChanges) -> Result<TimelineItem> {
        let existing = self.repo.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Timeline item not found".to_string())
        })?;

        if request.completed_at.is_none() {
            match request.status {
                Some(TimelineStatus::Completed) if existing.status != TimelineStatus::Completed => {
                    request.completed_at = Some(Some(Utc::now()));
                }
                Some(status) if status != TimelineStatus::Completed => {
                    request.completed_at = Some(None);
                }
                _ => {}
            }
        }

        self.repo.update(id, request).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await
    }
}
