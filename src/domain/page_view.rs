use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    validation::{Missing, Payload},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub id: Uuid,
    pub page: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPageView {
    pub page: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

impl NewPageView {
    pub fn from_payload(payload: &Payload, user_agent: Option<String>) -> Result<Self> {
        let mut missing = Missing::new();
        let page = payload.required_text("page", &mut missing);
        missing.check()?;

        Ok(Self {
            page,
            referrer: payload.text("referrer"),
            user_agent,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageCount {
    pub page: String,
    pub views: i64,
}

/// Numbers shown on the dashboard overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_events: i64,
    pub upcoming_events: i64,
    pub team_members: i64,
    pub departments: i64,
    pub timeline_items: i64,
    pub completed_milestones: i64,
    pub suggestions: i64,
    pub pending_suggestions: i64,
    pub active_announcements: i64,
    pub page_views: i64,
    pub page_views_last_7_days: i64,
    pub top_pages: Vec<PageCount>,
}
