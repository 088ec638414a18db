use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    validation::{Missing, Payload},
};

/// Account record owned by a team member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    /// Department name. Not a foreign key.
    pub department: String,
    pub bio: String,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub role: String,
    pub department: String,
    pub bio: String,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

impl NewTeamMember {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let name = payload.required_text("name", &mut missing);
        payload.required_text("email", &mut missing);
        let role = payload.required_text("role", &mut missing);
        let department = payload.required_text("department", &mut missing);
        missing.check()?;

        Ok(Self {
            name,
            email: payload.email("email")?.unwrap_or_default(),
            avatar: payload.text("avatar").or_else(|| payload.text("image")),
            role,
            department,
            bio: payload.text("bio").unwrap_or_default(),
            linkedin: payload.text("linkedin"),
            twitter: payload.text("twitter"),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
}

impl TeamMemberChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let name = payload.replacement_text("name", &mut missing);
        let email_present = payload.replacement_text("email", &mut missing).is_some();
        let role = payload.replacement_text("role", &mut missing);
        let department = payload.replacement_text("department", &mut missing);
        missing.check()?;

        let email = if email_present { payload.email("email")? } else { None };
        let avatar = payload
            .nullable_text("avatar")
            .or_else(|| payload.nullable_text("image"));

        Ok(Self {
            name,
            email,
            avatar,
            role,
            department,
            bio: payload.contains("bio").then(|| payload.text("bio").unwrap_or_default()),
            linkedin: payload.nullable_text("linkedin"),
            twitter: payload.nullable_text("twitter"),
        })
    }

    pub fn apply_to(self, member: &mut TeamMember) {
        if let Some(name) = self.name {
            member.user.name = name;
        }
        if let Some(email) = self.email {
            member.user.email = email;
        }
        if let Some(avatar) = self.avatar {
            member.user.avatar = avatar;
        }
        if let Some(role) = self.role {
            member.role = role;
        }
        if let Some(department) = self.department {
            member.department = department;
        }
        if let Some(bio) = self.bio {
            member.bio = bio;
        }
        if let Some(linkedin) = self.linkedin {
            member.linkedin = linkedin;
        }
        if let Some(twitter) = self.twitter {
            member.twitter = twitter;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDepartment {
    pub name: String,
    pub description: Option<String>,
}

impl NewDepartment {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let name = payload.required_text("name", &mut missing);
        missing.check()?;

        Ok(Self {
            name,
            description: payload.text("description"),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl DepartmentChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let mut missing = Missing::new();
        let name = payload.replacement_text("name", &mut missing);
        missing.check()?;

        Ok(Self {
            name,
            description: payload.nullable_text("description"),
        })
    }

    pub fn apply_to(self, department: &mut Department) {
        if let Some(name) = self.name {
            department.name = name;
        }
        if let Some(description) = self.description {
            department.description = description;
        }
    }
}
