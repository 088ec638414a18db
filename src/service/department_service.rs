use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{Department, DepartmentChanges, NewDepartment},
    error::{AppError, Result},
    repository::{DepartmentRepository, TeamRepository},
};

pub struct DepartmentService {
    repo: Arc<dyn DepartmentRepository>,
    team_repo: Arc<dyn TeamRepository>,
}

impl DepartmentService {
    pub fn new(repo: Arc<dyn DepartmentRepository>, team_repo: Arc<dyn TeamRepository>) -> Self {
        Self { repo, team_repo }
    }

    pub async fn list(&self) -> Result<Vec<Department>> {
        self.repo.list().await
    }

    /// Create a department with a unique name
    pub async fn create(&self, request: NewDepartment) -> Result<Department> {
        if self.repo.find_by_name(&request.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Department '{}' already exists",
                request.name
            )));
        }

        let department = self.repo.create(request).await?;
        tracing::info!("Created department {}", department.name);
        Ok(department)
    }

    /// Update a department. Renaming does not touch team members that
    /// still carry the old name.
    pub async fn update(&self, id: Uuid, request: DepartmentChanges) -> Result<Department> {
        if let Some(ref name) = request.name {
            if let Some(existing) = self.repo.find_by_name(name).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(format!(
                        "Department '{}' already exists",
                        name
                    )));
                }
            }
        }

        self.repo.update(id, request).await
    }

    /// Delete a department that no team member refers to by name
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let department = self.repo.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Department not found".to_string())
        })?;

        let member_count = self.team_repo.count_in_department(&department.name).await?;
        if member_count > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete department '{}': {} team member(s) still assigned",
                department.name, member_count
            )));
        }

        self.repo.delete(id).await?;
        tracing::info!("Deleted department {}", department.name);
        Ok(())
    }
}
