use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    validation::{normalize_label, Missing, Payload},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TimelineStatus,
    pub due_date: DateTime<Utc>,
    pub order: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub tasks: Vec<TimelineTask>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTask {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub position: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TimelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineStatus::Pending => "PENDING",
            TimelineStatus::InProgress => "IN_PROGRESS",
            TimelineStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "PENDING" => Some(TimelineStatus::Pending),
            "IN_PROGRESS" | "INPROGRESS" => Some(TimelineStatus::InProgress),
            "COMPLETED" => Some(TimelineStatus::Completed),
            _ => None,
        }
    }
}

/// Task as submitted, before it gets an id and position.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct NewTimelineItem {
    pub title: String,
    pub description: String,
    pub status: TimelineStatus,
    pub due_date: DateTime<Utc>,
    pub order: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub tasks: Vec<NewTask>,
}

impl NewTimelineItem {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.required_text("title", &mut missing);
        let description = payload.required_text("description", &mut missing);
        let due_date = payload.required_date("dueDate", &mut missing)?;
        let tasks = tasks_from_payload(payload, &mut missing)?;
        missing.check()?;

        Ok(Self {
            title,
            description,
            status: payload.choice("status", TimelineStatus::parse)?.unwrap_or_default(),
            due_date,
            order: payload.integer("order")?.unwrap_or(0),
            completed_at: payload.date("completedAt")?,
            tasks: tasks.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimelineItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TimelineStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub order: Option<i64>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
    /// When present the task list is replaced wholesale.
    pub tasks: Option<Vec<NewTask>>,
}

impl TimelineItemChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.replacement_text("title", &mut missing);
        let description = payload.replacement_text("description", &mut missing);
        if payload.contains("dueDate") && payload.text("dueDate").is_none() {
            missing.push("dueDate");
        }
        let tasks = tasks_from_payload(payload, &mut missing)?;
        missing.check()?;

        Ok(Self {
            title,
            description,
            status: payload.choice("status", TimelineStatus::parse)?,
            due_date: payload.date("dueDate")?,
            order: payload.integer("order")?,
            completed_at: payload.nullable_date("completedAt")?,
            tasks,
        })
    }

    /// Apply scalar changes. Tasks are written separately by the repository.
    pub fn apply_to(&self, item: &mut TimelineItem) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(due_date) = self.due_date {
            item.due_date = due_date;
        }
        if let Some(order) = self.order {
            item.order = order;
        }
        if let Some(completed_at) = self.completed_at {
            item.completed_at = completed_at;
        }
    }
}

fn tasks_from_payload(payload: &Payload, missing: &mut Missing) -> Result<Option<Vec<NewTask>>> {
    let Some(entries) = payload.objects("tasks")? else {
        return Ok(None);
    };

    let mut tasks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(title) = entry.text("title") else {
            missing.push(format!("tasks[{}].title", index));
            continue;
        };
        tasks.push(NewTask {
            title,
            completed: entry.boolean("completed")?.unwrap_or(false),
        });
    }
    Ok(Some(tasks))
}
