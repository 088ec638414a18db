use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    validation::{Missing, Payload},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    /// Higher shows first.
    pub priority: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub priority: i64,
}

impl NewAnnouncement {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.required_text("title", &mut missing);
        let content = payload.required_text("content", &mut missing);
        missing.check()?;

        Ok(Self {
            title,
            content,
            is_active: payload.boolean("isActive")?.unwrap_or(true),
            priority: payload.integer("priority")?.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnouncementChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub priority: Option<i64>,
}

impl AnnouncementChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.replacement_text("title", &mut missing);
        let content = payload.replacement_text("content", &mut missing);
        missing.check()?;

        Ok(Self {
            title,
            content,
            is_active: payload.boolean("isActive")?,
            priority: payload.integer("priority")?,
        })
    }

    pub fn apply_to(self, announcement: &mut Announcement) {
        if let Some(title) = self.title {
            announcement.title = title;
        }
        if let Some(content) = self.content {
            announcement.content = content;
        }
        if let Some(is_active) = self.is_active {
            announcement.is_active = is_active;
        }
        if let Some(priority) = self.priority {
            announcement.priority = priority;
        }
    }
}
