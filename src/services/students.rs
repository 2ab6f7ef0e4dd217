//! Student directory service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        professor::Professor,
        student::{Student, StudentInput},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
}

impl StudentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, department_id: Option<i32>) -> AppResult<Vec<Student>> {
        self.repository.students.list(department_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        self.repository.students.get_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>> {
        self.repository.students.get_by_email(email).await
    }

    pub async fn create(&self, data: &StudentInput) -> AppResult<Student> {
        self.check_input(data, None).await?;
        let student = self.repository.students.create(data).await?;
        tracing::info!(id = student.id, "Student created");
        Ok(student)
    }

    pub async fn update(&self, id: i32, data: &StudentInput) -> AppResult<Student> {
        self.check_input(data, Some(id)).await?;
        self.repository.students.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.students.delete(id).await
    }

    /// Supervising professor, if any
    pub async fn supervisor(&self, id: i32) -> AppResult<Option<Professor>> {
        let student = self.repository.students.get_by_id(id).await?;
        match student.supervisor_id {
            Some(professor_id) => Ok(Some(self.repository.professors.get_by_id(professor_id).await?)),
            None => Ok(None),
        }
    }

    async fn check_input(&self, data: &StudentInput, exclude_id: Option<i32>) -> AppResult<()> {
        data.validate()?;

        if !self.repository.departments.exists(data.department_id).await? {
            return Err(AppError::Validation(format!(
                "Department {} does not exist",
                data.department_id
            )));
        }
        if self.repository.students.email_exists(&data.email, exclude_id).await? {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }
        Ok(())
    }
}
