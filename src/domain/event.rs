use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    validation::{normalize_label, Missing, Payload},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Free text such as "6:00 PM - 8:00 PM".
    pub time: String,
    pub location: String,
    pub capacity: i64,
    pub status: EventStatus,
    pub category: String,
    /// Number of registrations, computed on read.
    pub attendees: i64,
    pub image: Option<String>,
    pub registration_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event still takes registrations, ignoring capacity.
    pub fn is_open(&self) -> bool {
        matches!(self.status, EventStatus::Upcoming | EventStatus::Ongoing)
    }

    /// A capacity of zero means unlimited.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.attendees >= self.capacity
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "UPCOMING",
            EventStatus::Ongoing => "ONGOING",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "UPCOMING" => Some(EventStatus::Upcoming),
            "ONGOING" => Some(EventStatus::Ongoing),
            "COMPLETED" => Some(EventStatus::Completed),
            "CANCELLED" | "CANCELED" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }
}

/// Validated input for creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub capacity: i64,
    pub status: EventStatus,
    pub category: String,
    pub image: Option<String>,
    pub registration_url: Option<String>,
}

impl NewEvent {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.required_text("title", &mut missing);
        let description = payload.required_text("description", &mut missing);
        let date = payload.required_date("date", &mut missing)?;
        let time = payload.required_text("time", &mut missing);
        let location = payload.required_text("location", &mut missing);
        let capacity = payload.required_integer("capacity", &mut missing)?;
        let category = payload.required_text("category", &mut missing);
        missing.check()?;

        Ok(Self {
            title,
            description,
            date,
            time,
            location,
            capacity,
            status: payload.choice("status", EventStatus::parse)?.unwrap_or_default(),
            category,
            image: payload.text("image"),
            registration_url: payload.text("registrationUrl"),
        })
    }
}

/// Validated partial update for an event. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub status: Option<EventStatus>,
    pub category: Option<String>,
    pub image: Option<Option<String>>,
    pub registration_url: Option<Option<String>>,
}

impl EventChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.replacement_text("title", &mut missing);
        let description = payload.replacement_text("description", &mut missing);
        let time = payload.replacement_text("time", &mut missing);
        let location = payload.replacement_text("location", &mut missing);
        let category = payload.replacement_text("category", &mut missing);
        for field in ["date", "capacity"] {
            if payload.contains(field) && payload.text(field).is_none() {
                missing.push(field);
            }
        }
        missing.check()?;

        Ok(Self {
            title,
            description,
            date: payload.date("date")?,
            time,
            location,
            capacity: payload.integer("capacity")?,
            status: payload.choice("status", EventStatus::parse)?,
            category,
            image: payload.nullable_text("image"),
            registration_url: payload.nullable_text("registrationUrl"),
        })
    }

    pub fn apply_to(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(time) = self.time {
            event.time = time;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(image) = self.image {
            event.image = image;
        }
        if let Some(registration_url) = self.registration_url {
            event.registration_url = registration_url;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
}

impl NewRegistration {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let name = payload.required_text("name", &mut missing);
        payload.required_text("email", &mut missing);
        missing.check()?;

        let email = payload.email("email")?.unwrap_or_default();
        Ok(Self { name, email })
    }
}
