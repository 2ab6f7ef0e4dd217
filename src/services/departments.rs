//! Department management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::department::{Department, DepartmentDetails, DepartmentInput, DepartmentSummary},
    models::subject::SubjectQuery,
    repository::Repository,
};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<DepartmentSummary>> {
        self.repository.departments.list().await
    }

    /// Department with its professors and subjects
    pub async fn get(&self, id: i32) -> AppResult<DepartmentDetails> {
        let department = self.repository.departments.get_by_id(id).await?;
        let professors = self.repository.professors.list(Some(id)).await?;
        let subjects = self
            .repository
            .subjects
            .list(&SubjectQuery {
                department_id: Some(id),
                status: None,
            })
            .await?;

        Ok(DepartmentDetails {
            department,
            professors_count: professors.len() as i64,
            professors,
            subjects,
        })
    }

    pub async fn create(&self, data: &DepartmentInput) -> AppResult<Department> {
        data.validate()?;
        self.ensure_unique(data, None).await?;

        let department = self.repository.departments.create(data).await?;
        tracing::info!(id = department.id, code = %department.code, "Department created");
        Ok(department)
    }

    pub async fn update(&self, id: i32, data: &DepartmentInput) -> AppResult<Department> {
        data.validate()?;
        self.ensure_unique(data, Some(id)).await?;
        self.repository.departments.update(id, data).await
    }

    /// Delete a department that no longer owns professors, students or subjects
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.departments.get_by_id(id).await?;

        if self.repository.departments.count_dependents(id).await? > 0 {
            return Err(AppError::BusinessRule(
                "Department still has professors, students or subjects".to_string(),
            ));
        }

        self.repository.departments.delete(id).await?;
        tracing::info!(id, "Department deleted");
        Ok(())
    }

    async fn ensure_unique(&self, data: &DepartmentInput, exclude_id: Option<i32>) -> AppResult<()> {
        let taken = self
            .repository
            .departments
            .name_or_code_taken(data.name.trim(), &data.normalized_code(), exclude_id)
            .await?;
        if taken {
            return Err(AppError::Conflict(
                "A department with this name or code already exists".to_string(),
            ));
        }
        Ok(())
    }
}
