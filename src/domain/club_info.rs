use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    validation::{Missing, Payload},
};

/// One entry of the site-wide key/value settings (contact email, mission
/// statement, social links and so on).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubInfo {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClubInfo {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

impl NewClubInfo {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let key = payload.required_text("key", &mut missing);
        let value = payload.required_text("value", &mut missing);
        missing.check()?;

        Ok(Self {
            key,
            value,
            description: payload.text("description"),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClubInfoChanges {
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<Option<String>>,
}

impl ClubInfoChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let key = payload.replacement_text("key", &mut missing);
        let value = payload.replacement_text("value", &mut missing);
        missing.check()?;

        Ok(Self {
            key,
            value,
            description: payload.nullable_text("description"),
        })
    }

    pub fn apply_to(self, info: &mut ClubInfo) {
        if let Some(key) = self.key {
            info.key = key;
        }
        if let Some(value) = self.value {
            info.value = value;
        }
        if let Some(description) = self.description {
            info.description = description;
        }
    }
}
