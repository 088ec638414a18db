use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{NewTeamMember, TeamMember, TeamMemberChanges},
    error::{AppError, Result},
    repository::TeamRepository,
};

pub struct TeamService {
    repo: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(repo: Arc<dyn TeamRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, department: Option<&str>) -> Result<Vec<TeamMember>> {
        self.repo.list(department).await
    }

    pub async fn create(&self, request: NewTeamMember) -> Result<TeamMember> {
        // Check for duplicate email
        if self.repo.find_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("Email already belongs to a team member".to_string()));
        }

        let member = self.repo.create(request).await?;
        tracing::info!("Added team member {} ({})", member.user.name, member.role);
        Ok(member)
    }

    pub async fn update(&self, id: Uuid, request: TeamMemberChanges) -> Result<TeamMember> {
        if let Some(ref email) = request.email {
            if let Some(user) = self.repo.find_user_by_email(email).await? {
                let member = self.repo.find_by_id(id).await?
                    .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;
                if member.user_id != user.id {
                    return Err(AppError::Conflict("Email already belongs to a team member".to_string()));
                }
            }
        }

        self.repo.update(id, request).await
    }

    /// Remove the member together with its user account
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await?;
        tracing::info!("Removed team member {}", id);
        Ok(())
    }
}
