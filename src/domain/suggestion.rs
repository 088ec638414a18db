use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    validation::{normalize_label, Missing, Payload},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSuggestion {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
    pub status: SuggestionStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Implemented,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "PENDING",
            SuggestionStatus::UnderReview => "UNDER_REVIEW",
            SuggestionStatus::Approved => "APPROVED",
            SuggestionStatus::Rejected => "REJECTED",
            SuggestionStatus::Implemented => "IMPLEMENTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "PENDING" => Some(SuggestionStatus::Pending),
            "UNDER_REVIEW" => Some(SuggestionStatus::UnderReview),
            "APPROVED" => Some(SuggestionStatus::Approved),
            "REJECTED" => Some(SuggestionStatus::Rejected),
            "IMPLEMENTED" => Some(SuggestionStatus::Implemented),
            _ => None,
        }
    }
}

/// A new submission. Status always starts as pending and admin notes can
/// only be added later.
#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub title: String,
    pub description: String,
    pub category: String,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
}

impl NewSuggestion {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.required_text("title", &mut missing);
        let description = payload.required_text("description", &mut missing);
        let category = payload.required_text("category", &mut missing);
        missing.check()?;

        Ok(Self {
            title,
            description,
            category,
            submitter_name: payload.text("submitterName"),
            submitter_email: payload.email("submitterEmail")?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<SuggestionStatus>,
    pub admin_notes: Option<Option<String>>,
}

impl SuggestionChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let title = payload.replacement_text("title", &mut missing);
        let description = payload.replacement_text("description", &mut missing);
        let category = payload.replacement_text("category", &mut missing);
        missing.check()?;

        Ok(Self {
            title,
            description,
            category,
            status: payload.choice("status", SuggestionStatus::parse)?,
            admin_notes: payload.nullable_text("adminNotes"),
        })
    }

    pub fn apply_to(self, suggestion: &mut IdeaSuggestion) {
        if let Some(title) = self.title {
            suggestion.title = title;
        }
        if let Some(description) = self.description {
            suggestion.description = description;
        }
        if let Some(category) = self.category {
            suggestion.category = category;
        }
        if let Some(status) = self.status {
            suggestion.status = status;
        }
        if let Some(admin_notes) = self.admin_notes {
            suggestion.admin_notes = admin_notes;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionFilter {
    pub status: Option<SuggestionStatus>,
    pub category: Option<String>,
    pub email: Option<String>,
}
